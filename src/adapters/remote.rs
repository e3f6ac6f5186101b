//! Remote adapter: a scoring service reached over a JSON transport.
//!
//! The request body is the clinical input; the response is either an
//! assessment or `{"error": "..."}`. Endpoints are tried in order and the
//! first valid answer wins.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{ClinicalInput, RiskAssessment, RiskFactor, MAX_RISK_SCORE};
use crate::ports::{Provenance, RiskScorer, Scored, ScorerKind, ScoringError, ScoringTransport};

/// Response body of a scoring service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAssessment {
    risk_score: f64,
    risk_factors: Vec<RiskFactor>,
    has_heart_disease: bool,
    #[serde(default)]
    model_used: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// Scorer backed by one or more remote endpoints.
pub struct RemoteScorer<T: ScoringTransport> {
    transport: T,
    endpoints: Vec<String>,
}

impl<T: ScoringTransport> RemoteScorer<T> {
    /// Create a remote scorer over `endpoints`, tried in the given order.
    pub fn new(transport: T, endpoints: Vec<String>) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    fn score_at(&self, url: &str, body: &Value) -> Result<Scored, ScoringError> {
        let response = self.transport.post_json(url, body)?;
        parse_response(response)
    }
}

/// Decode a service response into an assessment.
fn parse_response(response: Value) -> Result<Scored, ScoringError> {
    if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
        let message = error
            .as_str()
            .map_or_else(|| error.to_string(), ToString::to_string);
        return Err(ScoringError::Remote(message));
    }

    let wire: WireAssessment = serde_json::from_value(response)
        .map_err(|e| ScoringError::InvalidResponse(e.to_string()))?;

    let score = wire.risk_score;
    if !(0.0..=f64::from(MAX_RISK_SCORE)).contains(&score) || score.fract() != 0.0 {
        return Err(ScoringError::InvalidResponse(format!(
            "riskScore {score} is not an integer in [0, {MAX_RISK_SCORE}]"
        )));
    }

    let unknown = wire.risk_factors.iter().filter(|f| !f.is_known()).count();
    if unknown > 0 {
        tracing::debug!("Remote reported {unknown} factor(s) outside the local rule table");
    }

    let assessment =
        RiskAssessment::reported(score as u8, wire.risk_factors, wire.has_heart_disease);
    if !assessment.is_consistent() {
        tracing::warn!(
            "Remote flag disagrees with its score (score={}, hasHeartDisease={}); \
             keeping reported flag",
            assessment.risk_score(),
            assessment.has_heart_disease()
        );
    }

    Ok(Scored {
        assessment,
        provenance: Provenance {
            model_used: wire.model_used,
            message: wire.message,
        },
    })
}

impl<T: ScoringTransport> RiskScorer for RemoteScorer<T> {
    fn name(&self) -> &str {
        "remote-service"
    }

    fn kind(&self) -> ScorerKind {
        ScorerKind::Remote
    }

    fn evaluate(&self, input: &ClinicalInput) -> Result<Scored, ScoringError> {
        let body = serde_json::to_value(input)
            .map_err(|e| ScoringError::InvalidResponse(format!("request encoding failed: {e}")))?;

        let mut last_error = ScoringError::NoEndpoints;
        for (attempt, url) in self.endpoints.iter().enumerate() {
            match self.score_at(url, &body) {
                Ok(scored) => {
                    tracing::debug!("Remote endpoint #{} answered", attempt + 1);
                    return Ok(scored);
                }
                Err(e) => {
                    tracing::debug!("Remote endpoint #{} failed: {}", attempt + 1, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
