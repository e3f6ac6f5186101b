//! Adapters layer: Concrete implementations of ports.
//!
//! - `local`: the rule engine as a scorer
//! - `remote`: a scoring service behind a JSON transport
//! - `http`: `ureq` implementation of the transport
//! - `sanitize`: clinical-value and secret filtering for logs

pub mod http;
pub mod local;
pub mod remote;
pub mod sanitize;

pub use http::HttpTransport;
pub use local::LocalScorer;
pub use remote::RemoteScorer;
