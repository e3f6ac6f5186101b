//! Local adapter: the in-process rule engine as a `RiskScorer`.

use crate::domain::{self, ClinicalInput};
use crate::ports::{RiskScorer, Scored, ScorerKind, ScoringError};

/// Rule-engine scorer. Never fails and needs no configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScorer;

impl LocalScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Score the input with the rule engine.
    #[must_use]
    pub fn score(&self, input: &ClinicalInput) -> Scored {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(
                "Scoring with {} missing field(s); they contribute nothing",
                missing.len()
            );
        }

        domain::evaluate(input).into()
    }
}

impl RiskScorer for LocalScorer {
    fn name(&self) -> &str {
        "local-rules"
    }

    fn kind(&self) -> ScorerKind {
        ScorerKind::Local
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Scored, ScoringError> {
        Ok(self.score(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_matches_rule_engine() {
        let input = ClinicalInput::from_slice(&[
            58.0, 1.0, 1.0, 145.0, 210.0, 0.0, 1.0, 120.0, 0.0, 1.5, 1.0, 1.0, 3.0,
        ])
        .expect("Should build");

        let scored = LocalScorer::new().evaluate(&input).expect("Local never fails");
        assert_eq!(scored.assessment, domain::evaluate(&input));
        // 8 + 5 + 10 + 15 + 8 + 8 + 8 + 6 + 10
        assert_eq!(scored.assessment.risk_score(), 78);
        assert_eq!(scored.provenance.model_used, None);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let scored = LocalScorer::new()
            .evaluate(&ClinicalInput::default())
            .expect("Local never fails");
        assert_eq!(scored.assessment.risk_score(), 0);
    }
}
