//! Risk scorer port: the scoring contract shared by every implementation.
//!
//! The local rule engine and a remote scoring service are interchangeable
//! behind this trait; the application layer picks between them by policy.

use crate::domain::{ClinicalInput, RiskAssessment};

use super::transport::TransportError;

/// Errors a scorer can report to its caller's fallback logic.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Scoring service unreachable: {0}")]
    Transport(#[from] TransportError),

    #[error("Scoring service reported an error: {0}")]
    Remote(String),

    #[error("Invalid scoring response: {0}")]
    InvalidResponse(String),

    #[error("No scoring endpoints configured")]
    NoEndpoints,
}

/// Where an assessment was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    Local,
    Remote,
}

impl std::fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Provenance a remote service may attach to its answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Whether the service used a trained model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<bool>,
    /// Free-form note from the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// An assessment plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub assessment: RiskAssessment,
    pub provenance: Provenance,
}

impl From<RiskAssessment> for Scored {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            assessment,
            provenance: Provenance::default(),
        }
    }
}

/// Trait for risk scoring strategies.
///
/// Implementations must be deterministic for a given input when they
/// succeed, and must not hold per-call state.
pub trait RiskScorer: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Where this scorer computes.
    fn kind(&self) -> ScorerKind;

    /// Score the input.
    ///
    /// # Errors
    /// Returns `ScoringError` if the scorer could not produce a valid
    /// assessment. The local scorer never fails.
    fn evaluate(&self, input: &ClinicalInput) -> Result<Scored, ScoringError>;
}
