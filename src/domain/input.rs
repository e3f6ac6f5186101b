//! Clinical input record for heart-disease risk scoring.
//!
//! The 13 fields follow the Cleveland heart-disease dataset naming. Every field
//! is optional: values that are missing or not numeric are carried as `None`
//! and simply never match a scoring rule.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Names of the clinical fields, in rule-evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClinicalField {
    /// Age in years
    Age,
    /// Sex: 1 = male, 0 = female
    Sex,
    /// Chest-pain category (0 = typical angina, 1 = atypical, 2 = non-anginal, 3 = asymptomatic)
    ChestPain,
    /// Resting blood pressure in mmHg
    RestingBloodPressure,
    /// Serum cholesterol in mg/dl
    Cholesterol,
    /// Fasting blood sugar > 120 mg/dl: 0 = no, 1 = yes
    FastingBloodSugar,
    /// Resting ECG (0 = normal, 1 = ST-T abnormality, 2 = LV hypertrophy)
    RestingEcg,
    /// Maximum heart rate achieved
    MaxHeartRate,
    /// Exercise-induced angina: 0 = no, 1 = yes
    ExerciseAngina,
    /// ST depression induced by exercise relative to rest
    StDepression,
    /// Slope of the peak exercise ST segment (0 = up, 1 = flat, 2 = down)
    StSlope,
    /// Number of major vessels colored by fluoroscopy (0-4)
    MajorVessels,
    /// Thalassemia (0 = unknown, 1 = fixed defect, 2 = reversible defect, 3 = normal)
    Thalassemia,
}

impl ClinicalField {
    /// All fields in canonical order.
    pub const ALL: [ClinicalField; 13] = [
        Self::Age,
        Self::Sex,
        Self::ChestPain,
        Self::RestingBloodPressure,
        Self::Cholesterol,
        Self::FastingBloodSugar,
        Self::RestingEcg,
        Self::MaxHeartRate,
        Self::ExerciseAngina,
        Self::StDepression,
        Self::StSlope,
        Self::MajorVessels,
        Self::Thalassemia,
    ];

    /// Wire name of the field (lowercase dataset identifier).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Sex => "sex",
            Self::ChestPain => "cp",
            Self::RestingBloodPressure => "trestbps",
            Self::Cholesterol => "chol",
            Self::FastingBloodSugar => "fbs",
            Self::RestingEcg => "restecg",
            Self::MaxHeartRate => "thalach",
            Self::ExerciseAngina => "exang",
            Self::StDepression => "oldpeak",
            Self::StSlope => "slope",
            Self::MajorVessels => "ca",
            Self::Thalassemia => "thal",
        }
    }

    /// Look up a field by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl std::fmt::Display for ClinicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Clinical measurements for one assessment.
///
/// Deserialization is permissive: numbers are taken as-is, numeric strings are
/// parsed, and anything else (including unknown keys) is dropped. A request
/// body therefore never fails to parse because of a single bad value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ClinicalInput {
    pub age: Option<f64>,
    pub sex: Option<f64>,
    pub cp: Option<f64>,
    pub trestbps: Option<f64>,
    pub chol: Option<f64>,
    pub fbs: Option<f64>,
    pub restecg: Option<f64>,
    pub thalach: Option<f64>,
    pub exang: Option<f64>,
    pub oldpeak: Option<f64>,
    pub slope: Option<f64>,
    pub ca: Option<f64>,
    pub thal: Option<f64>,
}

impl ClinicalInput {
    /// Build an input from values given in canonical field order.
    ///
    /// # Errors
    /// Returns error if the slice does not hold exactly 13 values.
    pub fn from_slice(values: &[f64]) -> Result<Self, String> {
        if values.len() != ClinicalField::ALL.len() {
            return Err(format!(
                "Expected {} clinical values, got {}",
                ClinicalField::ALL.len(),
                values.len()
            ));
        }

        Ok(ClinicalField::ALL
            .iter()
            .zip(values)
            .fold(Self::default(), |input, (field, value)| input.with(*field, *value)))
    }

    /// Build an input from a JSON object, coercing each known field.
    ///
    /// Keys that name no clinical field are ignored.
    #[must_use]
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut input = Self::default();
        for (key, value) in fields {
            if let Some(field) = ClinicalField::from_name(key) {
                *input.slot_mut(field) = coerce_number(value);
            }
        }
        input
    }

    /// Parse an input from JSON text.
    ///
    /// # Errors
    /// Returns error if the text is not a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Return a copy with `field` set to `value`.
    #[must_use]
    pub fn with(mut self, field: ClinicalField, value: f64) -> Self {
        *self.slot_mut(field) = Some(value);
        self
    }

    /// Return a copy with `field` cleared.
    #[must_use]
    pub fn without(mut self, field: ClinicalField) -> Self {
        *self.slot_mut(field) = None;
        self
    }

    /// Value of a field, if present.
    #[must_use]
    pub fn get(&self, field: ClinicalField) -> Option<f64> {
        match field {
            ClinicalField::Age => self.age,
            ClinicalField::Sex => self.sex,
            ClinicalField::ChestPain => self.cp,
            ClinicalField::RestingBloodPressure => self.trestbps,
            ClinicalField::Cholesterol => self.chol,
            ClinicalField::FastingBloodSugar => self.fbs,
            ClinicalField::RestingEcg => self.restecg,
            ClinicalField::MaxHeartRate => self.thalach,
            ClinicalField::ExerciseAngina => self.exang,
            ClinicalField::StDepression => self.oldpeak,
            ClinicalField::StSlope => self.slope,
            ClinicalField::MajorVessels => self.ca,
            ClinicalField::Thalassemia => self.thal,
        }
    }

    fn slot_mut(&mut self, field: ClinicalField) -> &mut Option<f64> {
        match field {
            ClinicalField::Age => &mut self.age,
            ClinicalField::Sex => &mut self.sex,
            ClinicalField::ChestPain => &mut self.cp,
            ClinicalField::RestingBloodPressure => &mut self.trestbps,
            ClinicalField::Cholesterol => &mut self.chol,
            ClinicalField::FastingBloodSugar => &mut self.fbs,
            ClinicalField::RestingEcg => &mut self.restecg,
            ClinicalField::MaxHeartRate => &mut self.thalach,
            ClinicalField::ExerciseAngina => &mut self.exang,
            ClinicalField::StDepression => &mut self.oldpeak,
            ClinicalField::StSlope => &mut self.slope,
            ClinicalField::MajorVessels => &mut self.ca,
            ClinicalField::Thalassemia => &mut self.thal,
        }
    }

    /// Fields that are absent.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<ClinicalField> {
        ClinicalField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// Check that every field is present and within its clinical range.
    ///
    /// This is the caller's gate before scoring; the evaluator itself accepts
    /// anything.
    ///
    /// # Errors
    /// Returns all validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for field in ClinicalField::ALL {
            let Some(value) = self.get(field) else {
                errors.push(format!("Missing field: {field}"));
                continue;
            };

            let (min, max, whole) = valid_range(field);
            if !(min..=max).contains(&value) {
                errors.push(format!("{field} {value} out of range [{min}, {max}]"));
            } else if whole && value.fract() != 0.0 {
                errors.push(format!("{field} {value} must be a whole number"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Accepted range per field: (min, max, whole numbers only).
fn valid_range(field: ClinicalField) -> (f64, f64, bool) {
    match field {
        ClinicalField::Age => (1.0, 120.0, false),
        ClinicalField::Sex | ClinicalField::FastingBloodSugar | ClinicalField::ExerciseAngina => {
            (0.0, 1.0, true)
        }
        ClinicalField::ChestPain | ClinicalField::Thalassemia => (0.0, 3.0, true),
        ClinicalField::RestingBloodPressure => (50.0, 250.0, false),
        ClinicalField::Cholesterol => (50.0, 700.0, false),
        ClinicalField::RestingEcg | ClinicalField::StSlope => (0.0, 2.0, true),
        ClinicalField::MaxHeartRate => (40.0, 250.0, false),
        ClinicalField::StDepression => (0.0, 10.0, false),
        ClinicalField::MajorVessels => (0.0, 4.0, true),
    }
}

/// Coerce a JSON value to a finite number.
///
/// Form fields arrive as text, so numeric strings are accepted.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

impl From<Map<String, Value>> for ClinicalInput {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_fields(&fields)
    }
}

impl Serialize for ClinicalInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: Vec<(ClinicalField, f64)> = ClinicalField::ALL
            .iter()
            .filter_map(|f| self.get(*f).map(|v| (*f, v)))
            .collect();

        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (field, value) in present {
            map.serialize_entry(field.name(), &value)?;
        }
        map.end()
    }
}
