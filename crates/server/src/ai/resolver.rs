//! Department resolution: ask the model, fall back to the rule table

use std::sync::Arc;
use std::time::Duration;

use triage_core::{Department, FallbackReason, Recommendation, RuleTable, TriageRequest};

use super::Classifier;

/// Resolves a department for a validated request.
///
/// Cheap to clone; the rule table and classifier are shared.
#[derive(Clone)]
pub struct Resolver {
    rules: Arc<RuleTable>,
    classifier: Option<Arc<dyn Classifier>>,
    timeout: Duration,
}

impl Resolver {
    pub fn new(rules: RuleTable, classifier: Option<Arc<dyn Classifier>>, timeout: Duration) -> Self {
        Self {
            rules: Arc::new(rules),
            classifier,
            timeout,
        }
    }

    /// A resolver that only ever uses the rule table
    pub fn rules_only(rules: RuleTable) -> Self {
        Self::new(rules, None, Duration::ZERO)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn model_enabled(&self) -> bool {
        self.classifier.is_some()
    }

    /// Resolve a department. Never fails; model trouble becomes a fallback.
    pub async fn resolve(&self, request: &TriageRequest) -> Recommendation {
        match self.ask_model(request).await {
            Ok(department) => Recommendation::Model(department),
            Err(reason) => {
                let department = self.rules.classify(request.symptoms());
                tracing::warn!(
                    reason = %reason,
                    department = %department,
                    "Using rule table fallback"
                );
                Recommendation::Fallback { department, reason }
            }
        }
    }

    async fn ask_model(&self, request: &TriageRequest) -> Result<Department, FallbackReason> {
        let classifier = self.classifier.as_ref().ok_or(FallbackReason::Disabled)?;
        let prompt = triage_core::build_prompt(request);

        let reply = tokio::time::timeout(self.timeout, classifier.classify(&prompt))
            .await
            .map_err(|_| FallbackReason::Timeout)??;

        tracing::debug!(reply = %reply, "Model reply");

        Department::from_model_reply(&reply).ok_or(FallbackReason::OutOfSet(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use triage_core::{ClassifierError, PatientInput};

    struct Fixed(&'static str);

    #[async_trait]
    impl Classifier for Fixed {
        async fn classify(&self, _prompt: &str) -> Result<String, ClassifierError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl Classifier for Failing {
        async fn classify(&self, _prompt: &str) -> Result<String, ClassifierError> {
            Err(ClassifierError::Api {
                status: 401,
                message: "API key not valid".to_string(),
            })
        }
    }

    struct Slow;

    #[async_trait]
    impl Classifier for Slow {
        async fn classify(&self, _prompt: &str) -> Result<String, ClassifierError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("Cardiology".to_string())
        }
    }

    fn request(symptoms: &[&str]) -> TriageRequest {
        TriageRequest::try_from(PatientInput {
            gender: "female".to_string(),
            age: 22,
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        })
        .unwrap()
    }

    fn resolver(classifier: impl Classifier + 'static) -> Resolver {
        Resolver::new(
            RuleTable::builtin(),
            Some(Arc::new(classifier)),
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn uses_model_answer_when_in_set() {
        let rec = resolver(Fixed("Cardiology\n"))
            .resolve(&request(&["pusing"]))
            .await;
        assert_eq!(rec, Recommendation::Model(Department::Cardiology));
    }

    #[tokio::test]
    async fn failing_model_falls_back_to_rules() {
        let rec = resolver(Failing)
            .resolve(&request(&["pusing", "mual", "sulit berjalan"]))
            .await;
        assert_eq!(rec.department(), Department::Neurology);
        assert!(matches!(
            rec,
            Recommendation::Fallback {
                reason: FallbackReason::Upstream(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn out_of_set_answer_falls_back() {
        let rec = resolver(Fixed("Oncology")).resolve(&request(&["batuk"])).await;
        assert_eq!(
            rec,
            Recommendation::Fallback {
                department: Department::Pulmonology,
                reason: FallbackReason::OutOfSet("Oncology".to_string()),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_model_times_out() {
        let rec = resolver(Slow).resolve(&request(&["gusi berdarah"])).await;
        assert_eq!(
            rec,
            Recommendation::Fallback {
                department: Department::Dentistry,
                reason: FallbackReason::Timeout,
            }
        );
    }

    #[tokio::test]
    async fn disabled_model_uses_default_when_nothing_matches() {
        let rec = Resolver::rules_only(RuleTable::builtin())
            .resolve(&request(&["demam"]))
            .await;
        assert_eq!(
            rec,
            Recommendation::Fallback {
                department: Department::GeneralMedicine,
                reason: FallbackReason::Disabled,
            }
        );
    }
}
