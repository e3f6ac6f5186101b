//! # cardiorisk
//!
//! Auditable, rule-based heart-disease risk scoring.
//!
//! This crate provides:
//! - A deterministic rule engine mapping 13 clinical measurements to a capped
//!   risk score, a list of risk factors and a disease flag
//! - A recommendation generator driven by that assessment
//! - Interchangeable scoring strategies (remote service, local rules) with
//!   try-remote-then-local fallback
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core scoring types and pure functions (input, rules, assessment, recommendations)
//! - `ports`: Trait definitions for scorers and the remote transport
//! - `adapters`: Concrete implementations (local rules, remote scorer, ureq, log sanitizing)
//! - `application`: The assessment service running the scoring policy
//! - `config`: Environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{AssessmentReport, AssessmentService, ScoringPolicy};
pub use domain::{evaluate, recommend, ClinicalInput, RecommendationSet, RiskAssessment, RiskFactor};

/// Result type for cardiorisk operations
pub type Result<T> = std::result::Result<T, CardioError>;

/// Main error type for cardiorisk
///
/// Scoring itself never fails; these cover the surrounding plumbing.
#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    #[error("Invalid clinical input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
