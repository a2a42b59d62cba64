//! Prompt construction for the department classifier

use crate::department::Department;
use crate::patient::TriageRequest;

/// Build the classification prompt for a patient.
///
/// The model is told the full set of allowed departments and asked to answer
/// with a bare name, defaulting to General Medicine when unsure.
pub fn build_prompt(request: &TriageRequest) -> String {
    let departments = Department::ALL
        .iter()
        .map(Department::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a medical triage assistant. Given a patient with:\n\
         - Gender: {gender}\n\
         - Age: {age}\n\
         - Symptoms: {symptoms}\n\
         Recommend the most appropriate medical department.\n\
         Choose exactly one of: {departments}.\n\
         Return only the department name, nothing else.\n\
         If unsure, return '{default}'.",
        gender = request.gender(),
        age = request.age(),
        symptoms = request.symptoms().join(", "),
        default = Department::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::PatientInput;

    #[test]
    fn embeds_patient_details_and_departments() {
        let request = TriageRequest::try_from(PatientInput {
            gender: "female".to_string(),
            age: 22,
            symptoms: vec!["pusing".to_string(), "mual".to_string()],
        })
        .unwrap();

        let prompt = build_prompt(&request);

        assert!(prompt.contains("- Gender: female"));
        assert!(prompt.contains("- Age: 22"));
        assert!(prompt.contains("- Symptoms: pusing, mual"));
        for dept in Department::ALL {
            assert!(prompt.contains(dept.as_str()), "missing {dept}");
        }
        assert!(prompt.ends_with("If unsure, return 'General Medicine'."));
    }
}
