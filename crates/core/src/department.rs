use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hospital departments a patient can be routed to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Department {
    Neurology,
    Cardiology,
    Gastroenterology,
    Pulmonology,
    Psychiatry,
    #[serde(rename = "Internal Medicine")]
    InternalMedicine,
    Dentistry,
    Dermatology,
    #[default]
    #[serde(rename = "General Medicine")]
    GeneralMedicine,
}

impl Department {
    /// Every department, in the order they are offered to the model
    pub const ALL: [Department; 9] = [
        Department::Neurology,
        Department::Cardiology,
        Department::Gastroenterology,
        Department::Pulmonology,
        Department::Psychiatry,
        Department::InternalMedicine,
        Department::Dentistry,
        Department::Dermatology,
        Department::GeneralMedicine,
    ];

    /// Display name, as used on the wire and in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Neurology => "Neurology",
            Department::Cardiology => "Cardiology",
            Department::Gastroenterology => "Gastroenterology",
            Department::Pulmonology => "Pulmonology",
            Department::Psychiatry => "Psychiatry",
            Department::InternalMedicine => "Internal Medicine",
            Department::Dentistry => "Dentistry",
            Department::Dermatology => "Dermatology",
            Department::GeneralMedicine => "General Medicine",
        }
    }

    /// Parse a free-form model reply into a department.
    ///
    /// Tolerates surrounding whitespace, quotes, backticks, markdown bold and
    /// a trailing period, then matches names case-insensitively. Anything
    /// else is out of set.
    pub fn from_model_reply(reply: &str) -> Option<Department> {
        let cleaned = reply
            .trim()
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*') || c.is_whitespace())
            .trim_end_matches('.')
            .trim();

        cleaned.parse().ok()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known department names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown department '{0}'")]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.split_whitespace().collect::<Vec<_>>().join(" ");
        Department::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownDepartment(s.to_string()))
    }
}
