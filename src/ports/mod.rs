//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and its scoring strategies (local rules, remote
//! service) and the transport that reaches a remote service.

mod scorer;
mod transport;

pub use scorer::{Provenance, RiskScorer, Scored, ScorerKind, ScoringError};
pub use transport::{ScoringTransport, TransportError};
