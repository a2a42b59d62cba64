use thiserror::Error;

/// Validation failures for incoming patient data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    #[error("gender must be one of: male, female, other (got '{0}')")]
    InvalidGender(String),

    #[error("age must be a non-negative integer (got {0})")]
    InvalidAge(i64),

    #[error("symptoms list cannot be empty")]
    EmptySymptoms,

    #[error("symptom at position {0} is blank")]
    BlankSymptom(usize),
}

/// Failures of the external department classifier.
///
/// None of these reach the caller; the resolver turns them into a fallback.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("LLM API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("No text content in response")]
    EmptyResponse,
}

/// Failures loading the keyword rule table at startup
#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("Failed to read rule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rule file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rule for keyword '{keyword}' names {source}")]
    UnknownDepartment {
        keyword: String,
        #[source]
        source: crate::department::UnknownDepartment,
    },

    #[error("Rule keyword '{0}' appears more than once")]
    DuplicateKeyword(String),

    #[error("Rule keyword cannot be blank")]
    BlankKeyword,

    #[error("Rule table is empty")]
    Empty,
}
