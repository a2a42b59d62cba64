use serde::{Deserialize, Serialize};

/// Kind of error reported to the caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Invalid,
    UnsupportedMediaType,
    Throttled,
}

/// JSON error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(error: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            error,
            detail: detail.into(),
        }
    }

    /// Malformed or semantically invalid input
    pub fn invalid(detail: &str) -> Self {
        Self::new(ErrorKind::Invalid, detail)
    }

    pub fn throttled(detail: &str) -> Self {
        Self::new(ErrorKind::Throttled, detail)
    }
}
