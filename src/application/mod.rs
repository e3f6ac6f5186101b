//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod assessment;
mod intake;

pub use assessment::{AssessmentReport, AssessmentService, ScoringPolicy};
pub use intake::read_input;
