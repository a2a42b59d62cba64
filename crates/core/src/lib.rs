//! triage-core: Shared hospital triage types and rules
//!
//! This crate holds everything that does not touch the network:
//! the department set, patient validation, the keyword rule table,
//! prompt construction and the model/fallback recommendation type.

pub mod department;
pub mod error;
pub mod outcome;
pub mod patient;
pub mod prompt;
pub mod recommendation;
pub mod rules;

pub use department::{Department, UnknownDepartment};
pub use error::{ClassifierError, RuleTableError, TriageError};
pub use outcome::{ErrorKind, ErrorResponse};
pub use patient::{Gender, PatientInput, TriageRequest, TriageResponse};
pub use prompt::build_prompt;
pub use recommendation::{FallbackReason, Recommendation};
pub use rules::RuleTable;
