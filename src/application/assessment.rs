//! Assessment service: scores an input and builds recommendations.
//!
//! This service coordinates:
//! - Scorer selection by policy (remote first, local rule engine as fallback)
//! - Recommendation generation from the chosen assessment
//! - Report assembly with provenance and timestamp

use std::sync::Arc;

use serde::Serialize;

use crate::adapters::{HttpTransport, LocalScorer, RemoteScorer};
use crate::config::Settings;
use crate::domain::{recommend, ClinicalInput, RecommendationSet, RiskAssessment};
use crate::ports::{Provenance, RiskScorer, ScorerKind};

/// Which scorers to consult, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// Only the local rule engine
    LocalOnly,
    /// The remote scorer, falling back to the local rule engine on any failure
    RemoteThenLocal,
}

/// Complete result of one assessment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    #[serde(flatten)]
    pub assessment: RiskAssessment,

    pub recommendations: RecommendationSet,

    /// Scorer that produced the assessment
    pub source: ScorerKind,

    /// Whether a remote scorer was tried and failed first
    pub fell_back: bool,

    #[serde(flatten)]
    pub provenance: Provenance,

    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

/// Service running the scoring policy.
///
/// Holds no per-call state; share it across threads behind an `Arc`.
pub struct AssessmentService {
    remote: Option<Arc<dyn RiskScorer>>,
    local: LocalScorer,
    policy: ScoringPolicy,
}

impl AssessmentService {
    /// Create a service that scores locally only.
    #[must_use]
    pub fn local() -> Self {
        Self {
            remote: None,
            local: LocalScorer::new(),
            policy: ScoringPolicy::LocalOnly,
        }
    }

    /// Create a service with an optional remote scorer and a policy.
    ///
    /// Without a remote scorer every policy scores locally.
    pub fn new(remote: Option<Arc<dyn RiskScorer>>, policy: ScoringPolicy) -> Self {
        Self {
            remote,
            local: LocalScorer::new(),
            policy,
        }
    }

    /// Build the service described by `settings`, using HTTP for the remote scorer.
    ///
    /// A remote-then-local policy without endpoints is logged and scores
    /// locally.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.policy == ScoringPolicy::LocalOnly {
            return Self::local();
        }
        if settings.remote_endpoints.is_empty() {
            tracing::warn!("Remote-then-local policy without remote endpoints; scoring locally");
            return Self::local();
        }

        let transport = HttpTransport::new(settings.remote_timeout);
        let scorer = RemoteScorer::new(transport, settings.remote_endpoints.clone());
        tracing::info!(
            "Remote scorer configured with {} endpoint(s), timeout {:?}",
            scorer.endpoints().len(),
            settings.remote_timeout
        );

        let remote: Arc<dyn RiskScorer> = Arc::new(scorer);
        Self::new(Some(remote), settings.policy)
    }

    #[must_use]
    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Score `input` and build its recommendations.
    ///
    /// Never fails: remote failures are logged and answered locally.
    pub fn assess(&self, input: &ClinicalInput) -> AssessmentReport {
        let mut fell_back = false;

        if let (ScoringPolicy::RemoteThenLocal, Some(remote)) = (self.policy, &self.remote) {
            match remote.evaluate(input) {
                Ok(scored) => {
                    return self.report(scored.assessment, remote.kind(), false, scored.provenance)
                }
                Err(e) => {
                    tracing::warn!(
                        "Scorer '{}' unavailable, falling back to '{}': {}",
                        remote.name(),
                        self.local.name(),
                        e
                    );
                    fell_back = true;
                }
            }
        }

        let scored = self.local.score(input);
        self.report(scored.assessment, self.local.kind(), fell_back, scored.provenance)
    }

    fn report(
        &self,
        assessment: RiskAssessment,
        source: ScorerKind,
        fell_back: bool,
        provenance: Provenance,
    ) -> AssessmentReport {
        let recommendations = recommend(&assessment);

        tracing::info!(
            "Assessment complete: source={}, score={}, factors={}, disease={}",
            source,
            assessment.risk_score(),
            assessment.risk_factors().len(),
            assessment.has_heart_disease()
        );

        AssessmentReport {
            assessment,
            recommendations,
            source,
            fell_back,
            provenance,
            assessed_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::remote::tests::StubTransport;
    use crate::adapters::RemoteScorer;
    use crate::domain::{ClinicalField, RiskFactor, PREVENTIVE_ADVICE};
    use crate::ports::TransportError;
    use serde_json::json;

    const URL: &str = "http://scores.test/predict";

    fn severe() -> ClinicalInput {
        ClinicalInput::from_slice(&[
            70.0, 1.0, 0.0, 150.0, 260.0, 1.0, 2.0, 90.0, 1.0, 3.0, 2.0, 2.0, 2.0,
        ])
        .expect("Should build")
    }

    fn service_with(
        reply: Result<serde_json::Value, TransportError>,
        policy: ScoringPolicy,
    ) -> AssessmentService {
        let transport = StubTransport::default().reply(URL, reply);
        let remote: Arc<dyn RiskScorer> =
            Arc::new(RemoteScorer::new(transport, vec![URL.to_string()]));
        AssessmentService::new(Some(remote), policy)
    }

    #[test]
    fn test_local_report() {
        let report = AssessmentService::local().assess(&severe());

        assert_eq!(report.source, ScorerKind::Local);
        assert!(!report.fell_back);
        assert_eq!(report.assessment.risk_score(), 100);
        // 6 base + blood pressure + cholesterol + exercise angina
        assert_eq!(report.recommendations.len(), 9);
    }

    #[test]
    fn test_remote_answer_used() {
        let service = service_with(
            Ok(json!({
                "riskScore": 30,
                "riskFactors": ["High cholesterol"],
                "hasHeartDisease": false,
                "modelUsed": true
            })),
            ScoringPolicy::RemoteThenLocal,
        );

        let report = service.assess(&severe());
        assert_eq!(report.source, ScorerKind::Remote);
        assert!(!report.fell_back);
        assert_eq!(report.assessment.risk_score(), 30);
        assert_eq!(report.provenance.model_used, Some(true));
        assert_eq!(report.recommendations.len(), 7);
    }

    #[test]
    fn test_remote_flag_kept_when_inconsistent() {
        // Services with their own threshold may disagree with `score > 50`
        let service = service_with(
            Ok(json!({
                "riskScore": 55,
                "riskFactors": ["High blood pressure"],
                "hasHeartDisease": false,
                "modelUsed": true
            })),
            ScoringPolicy::RemoteThenLocal,
        );

        let report = service.assess(&severe());
        assert_eq!(report.source, ScorerKind::Remote);
        assert!(!report.fell_back);
        assert_eq!(report.assessment.risk_score(), 55);
        assert!(!report.assessment.has_heart_disease());
        assert!(!report.assessment.is_consistent());

        // Recommendations follow the reported flag
        let expected: Vec<&str> = PREVENTIVE_ADVICE
            .iter()
            .copied()
            .chain(["Focus on reducing sodium intake"])
            .collect();
        assert_eq!(report.recommendations.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_falls_back_on_transport_failure() {
        let service = service_with(
            Err(TransportError::Status(500, String::new())),
            ScoringPolicy::RemoteThenLocal,
        );

        let report = service.assess(&severe());
        assert_eq!(report.source, ScorerKind::Local);
        assert!(report.fell_back);
        assert_eq!(report.assessment, crate::domain::evaluate(&severe()));
    }

    #[test]
    fn test_falls_back_on_error_body() {
        let service = service_with(Ok(json!({"error": "boom"})), ScoringPolicy::RemoteThenLocal);

        let report = service.assess(&severe());
        assert_eq!(report.source, ScorerKind::Local);
        assert!(report.fell_back);
    }

    #[test]
    fn test_local_policy_skips_remote() {
        let transport =
            StubTransport::default().reply(URL, Err(TransportError::Status(500, String::new())));
        let remote = Arc::new(RemoteScorer::new(transport, vec![URL.to_string()]));
        let service = AssessmentService::new(
            Some(remote.clone() as Arc<dyn RiskScorer>),
            ScoringPolicy::LocalOnly,
        );

        let report = service.assess(&severe());
        assert_eq!(report.source, ScorerKind::Local);
        assert!(!report.fell_back);
        assert!(remote.transport().requests.lock().expect("lock").is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let input = ClinicalInput::default()
            .with(ClinicalField::RestingBloodPressure, 150.0)
            .with(ClinicalField::Cholesterol, 250.0);
        let report = AssessmentService::local().assess(&input);
        assert!(report.assessment.has_factor(&RiskFactor::HighBloodPressure));

        let value = serde_json::to_value(&report).expect("Should serialize");
        assert_eq!(value["riskScore"], json!(30));
        assert_eq!(value["hasHeartDisease"], json!(false));
        assert_eq!(value["riskFactors"], json!(["High blood pressure", "High cholesterol"]));
        assert_eq!(value["source"], json!("local"));
        assert_eq!(value["recommendations"].as_array().map(Vec::len), Some(8));
        assert!(value.get("modelUsed").is_none());
        assert!(value["assessedAt"].is_string());
    }

    #[test]
    fn test_from_settings() {
        let local = AssessmentService::from_settings(&Settings::default());
        assert_eq!(local.policy(), ScoringPolicy::LocalOnly);
        assert!(local.remote.is_none());

        let settings = Settings {
            remote_endpoints: vec![URL.to_string()],
            policy: ScoringPolicy::RemoteThenLocal,
            ..Settings::default()
        };
        let remote = AssessmentService::from_settings(&settings);
        assert_eq!(remote.policy(), ScoringPolicy::RemoteThenLocal);
        assert_eq!(remote.remote.as_ref().map(|r| r.kind()), Some(ScorerKind::Remote));

        let no_endpoints = Settings {
            policy: ScoringPolicy::RemoteThenLocal,
            ..Settings::default()
        };
        let service = AssessmentService::from_settings(&no_endpoints);
        assert_eq!(service.policy(), ScoringPolicy::LocalOnly);
        assert!(service.remote.is_none());
        assert_eq!(service.assess(&severe()).source, ScorerKind::Local);
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AssessmentService>();

        let service = Arc::new(AssessmentService::local());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    let input = severe().with(ClinicalField::MajorVessels, f64::from(i));
                    service.assess(&input).assessment
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let assessment = handle.join().expect("Thread should finish");
            let input = severe().with(ClinicalField::MajorVessels, i as f64);
            assert_eq!(assessment, crate::domain::evaluate(&input));
        }
    }
}
