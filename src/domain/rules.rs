//! Rule-based heart-disease risk evaluator.
//!
//! The scoring policy is a static table: one rule group per clinical field,
//! each holding mutually exclusive branches. Within a group the first
//! matching branch applies; groups are independent and their points add up.
//! The raw sum is capped at 100 and scores above 50 are classified as
//! heart disease.

use super::assessment::RiskAssessment;
use super::factor::{RiskFactor, VesselCount};
use super::input::{ClinicalField, ClinicalInput};

/// Predicate over a single field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// value > bound
    Above(f64),
    /// lower < value <= upper
    Within { lower: f64, upper: f64 },
    /// value < bound
    Below(f64),
    /// value == category
    Equals(f64),
}

impl Condition {
    /// NaN fails every comparison, so it never matches.
    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Self::Above(bound) => value > bound,
            Self::Within { lower, upper } => value > lower && value <= upper,
            Self::Below(bound) => value < bound,
            Self::Equals(category) => value == category,
        }
    }
}

/// Points contributed by a matching branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Points {
    Fixed(u32),
    /// Multiplied by the field value
    PerUnit(u32),
}

/// Factor recorded by a matching branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Adds to the score without a factor
    Silent,
    Flag(RiskFactor),
    /// Factor labelled with the vessel count
    VesselCount,
}

/// One branch of a rule group.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Condition,
    pub points: Points,
    pub finding: Finding,
}

/// Mutually exclusive branches over one field.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleGroup {
    pub field: ClinicalField,
    pub branches: &'static [Branch],
}

const fn branch(condition: Condition, points: u32, finding: Finding) -> Branch {
    Branch {
        condition,
        points: Points::Fixed(points),
        finding,
    }
}

/// The scoring policy, in evaluation order.
pub static RULES: &[RuleGroup] = &[
    RuleGroup {
        field: ClinicalField::Age,
        branches: &[
            branch(Condition::Above(65.0), 15, Finding::Flag(RiskFactor::AdvancedAge)),
            branch(Condition::Within { lower: 50.0, upper: 65.0 }, 8, Finding::Silent),
        ],
    },
    RuleGroup {
        field: ClinicalField::Sex,
        branches: &[branch(Condition::Equals(1.0), 5, Finding::Silent)],
    },
    RuleGroup {
        field: ClinicalField::ChestPain,
        branches: &[
            branch(Condition::Equals(0.0), 20, Finding::Flag(RiskFactor::TypicalAngina)),
            branch(Condition::Equals(1.0), 10, Finding::Flag(RiskFactor::AtypicalChestPain)),
        ],
    },
    RuleGroup {
        field: ClinicalField::RestingBloodPressure,
        branches: &[
            branch(Condition::Above(140.0), 15, Finding::Flag(RiskFactor::HighBloodPressure)),
            branch(Condition::Within { lower: 130.0, upper: 140.0 }, 8, Finding::Silent),
        ],
    },
    RuleGroup {
        field: ClinicalField::Cholesterol,
        branches: &[
            branch(Condition::Above(240.0), 15, Finding::Flag(RiskFactor::HighCholesterol)),
            branch(Condition::Within { lower: 200.0, upper: 240.0 }, 8, Finding::Silent),
        ],
    },
    RuleGroup {
        field: ClinicalField::FastingBloodSugar,
        branches: &[branch(
            Condition::Equals(1.0),
            10,
            Finding::Flag(RiskFactor::ElevatedFastingBloodSugar),
        )],
    },
    RuleGroup {
        field: ClinicalField::RestingEcg,
        branches: &[
            branch(Condition::Equals(1.0), 8, Finding::Flag(RiskFactor::EcgAbnormalities)),
            branch(
                Condition::Equals(2.0),
                12,
                Finding::Flag(RiskFactor::LeftVentricularHypertrophy),
            ),
        ],
    },
    RuleGroup {
        field: ClinicalField::MaxHeartRate,
        branches: &[branch(
            Condition::Below(100.0),
            12,
            Finding::Flag(RiskFactor::LowMaxHeartRate),
        )],
    },
    RuleGroup {
        field: ClinicalField::ExerciseAngina,
        branches: &[branch(
            Condition::Equals(1.0),
            15,
            Finding::Flag(RiskFactor::ExerciseInducedChestPain),
        )],
    },
    RuleGroup {
        field: ClinicalField::StDepression,
        branches: &[
            branch(Condition::Above(2.0), 15, Finding::Flag(RiskFactor::SignificantStDepression)),
            branch(Condition::Within { lower: 1.0, upper: 2.0 }, 8, Finding::Silent),
        ],
    },
    RuleGroup {
        field: ClinicalField::StSlope,
        branches: &[
            branch(Condition::Equals(2.0), 12, Finding::Flag(RiskFactor::DownslopingStSegment)),
            branch(Condition::Equals(1.0), 6, Finding::Silent),
        ],
    },
    RuleGroup {
        field: ClinicalField::MajorVessels,
        branches: &[Branch {
            condition: Condition::Above(0.0),
            points: Points::PerUnit(10),
            finding: Finding::VesselCount,
        }],
    },
    RuleGroup {
        field: ClinicalField::Thalassemia,
        branches: &[
            branch(Condition::Equals(1.0), 8, Finding::Flag(RiskFactor::FixedPerfusionDefect)),
            branch(
                Condition::Equals(2.0),
                12,
                Finding::Flag(RiskFactor::ReversiblePerfusionDefect),
            ),
        ],
    },
];

/// Contribution of one rule group to an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub field: ClinicalField,
    pub points: u32,
    pub factor: Option<RiskFactor>,
}

impl RuleGroup {
    /// Apply the first matching branch to the input, if any.
    ///
    /// Absent fields match nothing. Per-unit points are rounded to the
    /// nearest whole point.
    #[must_use]
    pub fn apply(&self, input: &ClinicalInput) -> Option<RuleHit> {
        let value = input.get(self.field)?;
        let branch = self.branches.iter().find(|b| b.condition.matches(value))?;

        let points = match branch.points {
            Points::Fixed(points) => points,
            // `as` saturates for out-of-range floats
            Points::PerUnit(per_unit) => (f64::from(per_unit) * value).round() as u32,
        };
        let factor = match &branch.finding {
            Finding::Silent => None,
            Finding::Flag(factor) => Some(factor.clone()),
            Finding::VesselCount => VesselCount::new(value).map(RiskFactor::MajorVessels),
        };

        Some(RuleHit {
            field: self.field,
            points,
            factor,
        })
    }
}

/// Rule groups that fired for `input`, in evaluation order.
#[must_use]
pub fn explain(input: &ClinicalInput) -> Vec<RuleHit> {
    RULES.iter().filter_map(|group| group.apply(input)).collect()
}

/// Unclamped sum of all rule contributions.
#[must_use]
pub fn raw_score(input: &ClinicalInput) -> u32 {
    explain(input)
        .iter()
        .fold(0u32, |score, hit| score.saturating_add(hit.points))
}

/// Score a clinical input.
///
/// Total over any input: missing or non-numeric fields contribute nothing.
#[must_use]
pub fn evaluate(input: &ClinicalInput) -> RiskAssessment {
    let (score, factors) = explain(input).into_iter().fold(
        (0u32, Vec::new()),
        |(score, mut factors), hit| {
            factors.extend(hit.factor);
            (score.saturating_add(hit.points), factors)
        },
    );

    RiskAssessment::from_raw_score(score, factors)
}
