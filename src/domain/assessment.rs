//! Risk assessment result types.
//!
//! Represents the output of the scoring contract shared by the local rule
//! engine and any remote scorer.

use serde::{Deserialize, Serialize};

use super::factor::RiskFactor;

/// Upper bound of the risk score.
pub const MAX_RISK_SCORE: u8 = 100;

/// Scores strictly above this are classified as heart disease.
pub const DISEASE_THRESHOLD: u8 = 50;

/// Outcome of one risk evaluation.
///
/// Serializes as `{"riskScore", "riskFactors", "hasHeartDisease"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    risk_score: u8,
    risk_factors: Vec<RiskFactor>,
    has_heart_disease: bool,
}

impl RiskAssessment {
    /// Build an assessment from an unbounded additive score.
    ///
    /// The score is clamped to [0, 100] and the disease flag is derived from
    /// the clamped value.
    #[must_use]
    pub fn from_raw_score(raw_score: u32, risk_factors: Vec<RiskFactor>) -> Self {
        let risk_score = raw_score.min(u32::from(MAX_RISK_SCORE)) as u8;
        Self {
            risk_score,
            risk_factors,
            has_heart_disease: risk_score > DISEASE_THRESHOLD,
        }
    }

    /// Build an assessment exactly as another scorer reported it.
    ///
    /// The caller is responsible for range-checking `risk_score`.
    pub(crate) fn reported(
        risk_score: u8,
        risk_factors: Vec<RiskFactor>,
        has_heart_disease: bool,
    ) -> Self {
        Self {
            risk_score,
            risk_factors,
            has_heart_disease,
        }
    }

    #[must_use]
    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    #[must_use]
    pub fn risk_factors(&self) -> &[RiskFactor] {
        &self.risk_factors
    }

    #[must_use]
    pub fn has_heart_disease(&self) -> bool {
        self.has_heart_disease
    }

    /// Whether `factor` was triggered.
    #[must_use]
    pub fn has_factor(&self, factor: &RiskFactor) -> bool {
        self.risk_factors.contains(factor)
    }

    /// Whether the disease flag agrees with the score threshold.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.has_heart_disease == (self.risk_score > DISEASE_THRESHOLD)
    }

    /// Result-card title.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        if self.has_heart_disease {
            "Elevated Risk Detected"
        } else {
            "Heart Health Looks Good"
        }
    }

    /// Result-card paragraph.
    #[must_use]
    pub fn description(&self) -> String {
        let outlook = if self.has_heart_disease {
            "This suggests you may benefit from further medical evaluation and lifestyle modifications."
        } else {
            "Your heart health appears to be in good condition, but maintaining healthy habits is always important."
        };
        format!(
            "Based on the provided health parameters, the assessment indicates a {}% risk level for heart disease. {}",
            self.risk_score, outlook
        )
    }
}
