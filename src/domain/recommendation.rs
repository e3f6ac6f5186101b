//! Recommendation generator.
//!
//! A base list chosen by the disease flag, followed by targeted advice for a
//! small set of risk factors.

use serde::Serialize;

use super::assessment::RiskAssessment;
use super::factor::RiskFactor;

/// Base advice when heart disease is indicated.
pub const ELEVATED_RISK_ADVICE: [&str; 6] = [
    "Consult with a cardiologist for comprehensive evaluation",
    "Consider stress testing and advanced cardiac imaging",
    "Monitor blood pressure and cholesterol levels regularly",
    "Implement a heart-healthy diet low in saturated fats",
    "Engage in supervised exercise program",
    "Take prescribed medications as directed",
];

/// Base advice when heart disease is not indicated.
pub const PREVENTIVE_ADVICE: [&str; 6] = [
    "Maintain regular cardiovascular exercise (150 min/week)",
    "Follow a balanced, heart-healthy diet",
    "Schedule annual health checkups",
    "Maintain healthy weight and manage stress",
    "Avoid smoking and limit alcohol consumption",
    "Monitor blood pressure and cholesterol periodically",
];

/// Targeted advice, appended in this order when the factor is present.
pub static FACTOR_ADVICE: [(RiskFactor, &str); 3] = [
    (RiskFactor::HighBloodPressure, "Focus on reducing sodium intake"),
    (RiskFactor::HighCholesterol, "Consider dietary changes to lower cholesterol"),
    (
        RiskFactor::ExerciseInducedChestPain,
        "Avoid strenuous exercise until cleared by physician",
    ),
];

/// Ordered recommendations for one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet(Vec<&'static str>);

impl RecommendationSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[&'static str] {
        &self.0
    }
}

impl IntoIterator for RecommendationSet {
    type Item = &'static str;
    type IntoIter = std::vec::IntoIter<&'static str>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Build recommendations for an assessment.
#[must_use]
pub fn recommend(assessment: &RiskAssessment) -> RecommendationSet {
    let base = if assessment.has_heart_disease() {
        &ELEVATED_RISK_ADVICE
    } else {
        &PREVENTIVE_ADVICE
    };

    let extras = FACTOR_ADVICE
        .iter()
        .filter(|(factor, _)| assessment.has_factor(factor))
        .map(|(_, advice)| *advice);

    RecommendationSet(base.iter().copied().chain(extras).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_lists_disjoint() {
        for advice in ELEVATED_RISK_ADVICE {
            assert!(!PREVENTIVE_ADVICE.contains(&advice), "{advice}");
        }
    }

    #[test]
    fn test_base_selection_flips() {
        let high = recommend(&RiskAssessment::from_raw_score(80, Vec::new()));
        let low = recommend(&RiskAssessment::from_raw_score(20, Vec::new()));

        assert_eq!(high.as_slice(), &ELEVATED_RISK_ADVICE);
        assert_eq!(low.as_slice(), &PREVENTIVE_ADVICE);
        assert!(high.iter().all(|h| low.iter().all(|l| l != h)));
    }

    #[test]
    fn test_appendix_order() {
        // Factors deliberately listed out of priority order
        let assessment = RiskAssessment::from_raw_score(
            45,
            vec![RiskFactor::HighCholesterol, RiskFactor::HighBloodPressure],
        );
        let recs = recommend(&assessment);

        assert_eq!(recs.len(), 8);
        assert_eq!(recs.as_slice()[6], "Focus on reducing sodium intake");
        assert_eq!(recs.as_slice()[7], "Consider dietary changes to lower cholesterol");
    }

    #[test]
    fn test_all_appendices() {
        let assessment = RiskAssessment::from_raw_score(
            100,
            vec![
                RiskFactor::ExerciseInducedChestPain,
                RiskFactor::HighCholesterol,
                RiskFactor::HighBloodPressure,
            ],
        );
        let recs: Vec<&str> = recommend(&assessment).into_iter().collect();

        assert_eq!(recs.len(), 9);
        assert_eq!(recs[0], ELEVATED_RISK_ADVICE[0]);
        assert_eq!(recs[8], "Avoid strenuous exercise until cleared by physician");
    }

    #[test]
    fn test_other_factors_add_nothing() {
        let assessment = RiskAssessment::from_raw_score(
            60,
            vec![
                RiskFactor::AdvancedAge,
                RiskFactor::MajorVessels(2u32.into()),
                RiskFactor::LowMaxHeartRate,
                RiskFactor::Other("Very high blood pressure".to_string()),
            ],
        );
        assert_eq!(recommend(&assessment).len(), 6);
    }
}
