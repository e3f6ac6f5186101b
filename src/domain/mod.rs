//! Domain layer: Core scoring types and logic.
//!
//! This module contains pure Rust types and functions with no I/O.
//! Scoring and recommendation are total, deterministic and reentrant.

mod assessment;
mod factor;
mod input;
mod recommendation;
pub mod rules;

pub use assessment::{RiskAssessment, DISEASE_THRESHOLD, MAX_RISK_SCORE};
pub use factor::{RiskFactor, VesselCount};
pub use input::{ClinicalField, ClinicalInput};
pub use recommendation::{recommend, RecommendationSet, ELEVATED_RISK_ADVICE, PREVENTIVE_ADVICE};
pub use rules::evaluate;
