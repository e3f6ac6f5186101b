//! Risk-factor kinds attached to an assessment.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of major vessels with narrowing, as reported.
///
/// Kept as given (fractions included) so the label shows the input value.
/// Always finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VesselCount(f64);

impl VesselCount {
    /// Wrap a reported count. Returns `None` for NaN or infinite values.
    #[must_use]
    pub fn new(count: f64) -> Option<Self> {
        count.is_finite().then_some(Self(count))
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

// NaN is rejected by `new`, so equality is total.
impl Eq for VesselCount {}

impl From<u32> for VesselCount {
    fn from(count: u32) -> Self {
        Self(f64::from(count))
    }
}

impl std::fmt::Display for VesselCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A clinical finding that crossed a scoring threshold.
///
/// Logic matches on the variant; the label is for display and the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskFactor {
    AdvancedAge,
    TypicalAngina,
    AtypicalChestPain,
    HighBloodPressure,
    HighCholesterol,
    ElevatedFastingBloodSugar,
    EcgAbnormalities,
    LeftVentricularHypertrophy,
    LowMaxHeartRate,
    ExerciseInducedChestPain,
    SignificantStDepression,
    DownslopingStSegment,
    MajorVessels(VesselCount),
    FixedPerfusionDefect,
    ReversiblePerfusionDefect,
    /// Label reported by a remote scorer that the local rules never emit
    Other(String),
}

const VESSEL_SUFFIX: &str = " major vessel(s) with narrowing";

impl RiskFactor {
    /// Every fixed-label variant, for label lookup.
    const LABELLED: [RiskFactor; 14] = [
        Self::AdvancedAge,
        Self::TypicalAngina,
        Self::AtypicalChestPain,
        Self::HighBloodPressure,
        Self::HighCholesterol,
        Self::ElevatedFastingBloodSugar,
        Self::EcgAbnormalities,
        Self::LeftVentricularHypertrophy,
        Self::LowMaxHeartRate,
        Self::ExerciseInducedChestPain,
        Self::SignificantStDepression,
        Self::DownslopingStSegment,
        Self::FixedPerfusionDefect,
        Self::ReversiblePerfusionDefect,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> Cow<'_, str> {
        let fixed = match self {
            Self::AdvancedAge => "Advanced age",
            Self::TypicalAngina => "Typical angina symptoms",
            Self::AtypicalChestPain => "Atypical chest pain",
            Self::HighBloodPressure => "High blood pressure",
            Self::HighCholesterol => "High cholesterol",
            Self::ElevatedFastingBloodSugar => "Elevated fasting blood sugar",
            Self::EcgAbnormalities => "ECG abnormalities",
            Self::LeftVentricularHypertrophy => "Left ventricular hypertrophy",
            Self::LowMaxHeartRate => "Low maximum heart rate",
            Self::ExerciseInducedChestPain => "Exercise-induced chest pain",
            Self::SignificantStDepression => "Significant ST depression",
            Self::DownslopingStSegment => "Downsloping ST segment",
            Self::FixedPerfusionDefect => "Fixed perfusion defect",
            Self::ReversiblePerfusionDefect => "Reversible perfusion defect",
            Self::MajorVessels(count) => return Cow::Owned(format!("{count}{VESSEL_SUFFIX}")),
            Self::Other(label) => return Cow::Borrowed(label),
        };
        Cow::Borrowed(fixed)
    }

    /// Map a label back to its kind. Unknown labels become [`RiskFactor::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if let Some(known) = Self::LABELLED.iter().find(|f| f.label() == label) {
            return known.clone();
        }

        label
            .strip_suffix(VESSEL_SUFFIX)
            .and_then(|count| count.parse::<f64>().ok())
            .and_then(VesselCount::new)
            .map_or_else(|| Self::Other(label.to_string()), Self::MajorVessels)
    }

    /// Whether the local rule table can produce this factor.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for RiskFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for RiskFactor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_back() {
        for factor in RiskFactor::LABELLED {
            assert_eq!(RiskFactor::from_label(&factor.label()), factor);
        }
    }

    #[test]
    fn test_vessel_label() {
        let factor = RiskFactor::MajorVessels(2u32.into());
        assert_eq!(factor.to_string(), "2 major vessel(s) with narrowing");
        assert_eq!(
            RiskFactor::from_label("3 major vessel(s) with narrowing"),
            RiskFactor::MajorVessels(3u32.into())
        );
    }

    #[test]
    fn test_fractional_vessel_label() {
        let count = VesselCount::new(2.7).expect("finite");
        let factor = RiskFactor::MajorVessels(count);
        assert_eq!(factor.to_string(), "2.7 major vessel(s) with narrowing");
        assert_eq!(RiskFactor::from_label(&factor.label()), factor);

        assert!(VesselCount::new(f64::NAN).is_none());
        assert!(!RiskFactor::from_label("NaN major vessel(s) with narrowing").is_known());
        assert!(!RiskFactor::from_label("inf major vessel(s) with narrowing").is_known());
    }

    #[test]
    fn test_unknown_label() {
        let factor = RiskFactor::from_label("Male gender");
        assert_eq!(factor, RiskFactor::Other("Male gender".to_string()));
        assert!(!factor.is_known());
        assert_eq!(factor.label(), "Male gender");

        // Near-misses stay unknown
        assert!(!RiskFactor::from_label("high blood pressure").is_known());
        assert!(!RiskFactor::from_label("many major vessel(s) with narrowing").is_known());
    }
}
