use std::fmt;

use crate::department::Department;
use crate::error::ClassifierError;

/// Why the rule table was used instead of the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No model is configured
    Disabled,
    /// The model did not answer within the deadline
    Timeout,
    /// The call failed (transport, auth, quota, decode)
    Upstream(String),
    /// The model answered with something outside the department set
    OutOfSet(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Disabled => f.write_str("model disabled"),
            FallbackReason::Timeout => f.write_str("model timed out"),
            FallbackReason::Upstream(msg) => write!(f, "model call failed: {msg}"),
            FallbackReason::OutOfSet(reply) => write!(f, "model answered out of set: {reply:?}"),
        }
    }
}

impl From<ClassifierError> for FallbackReason {
    fn from(err: ClassifierError) -> Self {
        FallbackReason::Upstream(err.to_string())
    }
}

/// Outcome of resolving a department: from the model, or from the rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    Model(Department),
    Fallback {
        department: Department,
        reason: FallbackReason,
    },
}

impl Recommendation {
    pub fn department(&self) -> Department {
        match self {
            Recommendation::Model(department) => *department,
            Recommendation::Fallback { department, .. } => *department,
        }
    }

    /// `"model"` or `"fallback"`, for headers and metric labels
    pub fn source(&self) -> &'static str {
        match self {
            Recommendation::Model(_) => "model",
            Recommendation::Fallback { .. } => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Recommendation::Fallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_department_and_source() {
        let model = Recommendation::Model(Department::Cardiology);
        assert_eq!(model.department(), Department::Cardiology);
        assert_eq!(model.source(), "model");
        assert!(!model.is_fallback());

        let fallback = Recommendation::Fallback {
            department: Department::Neurology,
            reason: FallbackReason::Timeout,
        };
        assert_eq!(fallback.department(), Department::Neurology);
        assert_eq!(fallback.source(), "fallback");
        assert!(fallback.is_fallback());
    }

    #[test]
    fn classifier_errors_become_upstream_reasons() {
        let reason = FallbackReason::from(ClassifierError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        });
        assert_eq!(
            reason,
            FallbackReason::Upstream("LLM API error (429): quota exceeded".to_string())
        );
    }
}
