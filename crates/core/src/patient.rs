//! Patient input as received on the wire, and its validated form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::department::Department;
use crate::error::TriageError;

/// Patient gender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(TriageError::InvalidGender(s.to_string())),
        }
    }
}

/// Request body of `POST /recommend`, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct PatientInput {
    pub gender: String,
    pub age: i64,
    pub symptoms: Vec<String>,
}

/// A validated triage request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageRequest {
    gender: Gender,
    age: u32,
    symptoms: Vec<String>,
}

impl TriageRequest {
    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Trimmed, non-blank symptoms in the order the patient gave them
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }
}

impl TryFrom<PatientInput> for TriageRequest {
    type Error = TriageError;

    fn try_from(input: PatientInput) -> Result<Self, Self::Error> {
        let gender = input.gender.parse()?;
        let age = u32::try_from(input.age).map_err(|_| TriageError::InvalidAge(input.age))?;

        if input.symptoms.is_empty() {
            return Err(TriageError::EmptySymptoms);
        }

        let symptoms = input
            .symptoms
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Err(TriageError::BlankSymptom(i))
                } else {
                    Ok(trimmed.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            gender,
            age,
            symptoms,
        })
    }
}

/// Response body of `POST /recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriageResponse {
    pub recommended_department: Department,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(gender: &str, age: i64, symptoms: &[&str]) -> PatientInput {
        PatientInput {
            gender: gender.to_string(),
            age,
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn accepts_valid_input() {
        let req = TriageRequest::try_from(input("Female", 22, &[" pusing ", "mual"])).unwrap();
        assert_eq!(req.gender(), Gender::Female);
        assert_eq!(req.age(), 22);
        assert_eq!(req.symptoms(), ["pusing", "mual"]);
    }

    #[test]
    fn rejects_unknown_gender() {
        let err = TriageRequest::try_from(input("robot", 30, &["batuk"])).unwrap_err();
        assert_eq!(err, TriageError::InvalidGender("robot".to_string()));
    }

    #[test]
    fn rejects_negative_age() {
        let err = TriageRequest::try_from(input("male", -1, &["batuk"])).unwrap_err();
        assert_eq!(err, TriageError::InvalidAge(-1));
    }

    #[test]
    fn accepts_zero_age() {
        assert!(TriageRequest::try_from(input("other", 0, &["batuk"])).is_ok());
    }

    #[test]
    fn rejects_empty_symptoms() {
        let err = TriageRequest::try_from(input("male", 40, &[])).unwrap_err();
        assert_eq!(err, TriageError::EmptySymptoms);
    }

    #[test]
    fn rejects_blank_symptom() {
        let err = TriageRequest::try_from(input("male", 40, &["batuk", "   "])).unwrap_err();
        assert_eq!(err, TriageError::BlankSymptom(1));
    }

    #[test]
    fn response_shape() {
        let body = serde_json::to_value(TriageResponse {
            recommended_department: Department::Neurology,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"recommended_department": "Neurology"}));
    }
}
