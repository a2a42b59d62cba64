//! Keyword rule table used when the model cannot be consulted

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::department::Department;
use crate::error::RuleTableError;

/// Built-in keyword table (Indonesian symptom phrases)
const BUILTIN_RULES: &[(&str, Department)] = &[
    ("pusing", Department::Neurology),
    ("sakit kepala", Department::Neurology),
    ("sulit berjalan", Department::Neurology),
    ("kehilangan keseimbangan", Department::Neurology),
    ("mual", Department::Gastroenterology),
    ("sakit perut", Department::Gastroenterology),
    ("batuk", Department::Pulmonology),
    ("sesak napas", Department::Pulmonology),
    ("susah tidur", Department::Psychiatry),
    ("menggigil", Department::InternalMedicine),
    ("memar di tangan", Department::Dermatology),
    ("gusi berdarah", Department::Dentistry),
];

/// Read-only mapping from symptom keyword to department
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: HashMap<String, Department>,
}

/// Lowercase and reduce to words separated by single spaces.
///
/// Punctuation counts as a word break, so "batuk," and "batuk" normalize alike.
fn normalize(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

impl RuleTable {
    /// The table shipped with the service
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(keyword, dept)| (keyword.to_string(), *dept))
            .collect();
        Self { rules }
    }

    /// Build a table from keyword/department pairs, normalizing keywords.
    ///
    /// Two keywords that normalize to the same text are rejected.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, RuleTableError>
    where
        I: IntoIterator<Item = (K, Department)>,
        K: AsRef<str>,
    {
        let mut rules = HashMap::new();
        for (keyword, dept) in pairs {
            let keyword = normalize(keyword.as_ref());
            if keyword.is_empty() {
                return Err(RuleTableError::BlankKeyword);
            }
            if rules.contains_key(&keyword) {
                return Err(RuleTableError::DuplicateKeyword(keyword));
            }
            rules.insert(keyword, dept);
        }

        if rules.is_empty() {
            return Err(RuleTableError::Empty);
        }

        Ok(Self { rules })
    }

    /// Parse a JSON object of `{"keyword": "Department Name"}`
    pub fn from_json(json: &str) -> Result<Self, RuleTableError> {
        // Sorted, so errors always name the same keyword
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;

        let pairs = raw
            .into_iter()
            .map(|(keyword, name)| match name.parse::<Department>() {
                Ok(dept) => Ok((keyword, dept)),
                Err(source) => Err(RuleTableError::UnknownDepartment { keyword, source }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_pairs(pairs)
    }

    /// Load a JSON rule file from disk
    pub fn load(path: &Path) -> Result<Self, RuleTableError> {
        let json = std::fs::read_to_string(path).map_err(|source| RuleTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Number of keywords in the table
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Department for the most specific keyword found in one symptom.
    ///
    /// A keyword matches when it equals the normalized symptom or appears in
    /// it as a whole-word phrase. Among several matches the longest keyword
    /// wins, ties broken alphabetically so the result never depends on hash
    /// order.
    pub fn lookup(&self, symptom: &str) -> Option<Department> {
        let symptom = normalize(symptom);
        if symptom.is_empty() {
            return None;
        }

        if let Some(dept) = self.rules.get(&symptom) {
            return Some(*dept);
        }

        let padded = format!(" {symptom} ");
        self.rules
            .iter()
            .filter(|(keyword, _)| padded.contains(&format!(" {keyword} ")))
            .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
            .map(|(_, dept)| *dept)
    }

    /// Pick a department for a whole symptom list. Never fails.
    ///
    /// Each matched symptom casts one vote; the department with most votes
    /// wins, ties going to whichever department was voted for first.
    /// Without any match the result is General Medicine.
    pub fn classify<S: AsRef<str>>(&self, symptoms: &[S]) -> Department {
        // (department, votes) in order of first vote
        let mut tally: Vec<(Department, usize)> = Vec::new();

        for dept in symptoms.iter().filter_map(|s| self.lookup(s.as_ref())) {
            match tally.iter_mut().find(|(d, _)| *d == dept) {
                Some((_, votes)) => *votes += 1,
                None => tally.push((dept, 1)),
            }
        }

        let mut best: Option<(Department, usize)> = None;
        for (dept, votes) in tally {
            if best.is_none_or(|(_, top)| votes > top) {
                best = Some((dept, votes));
            }
        }

        best.map(|(dept, _)| dept).unwrap_or_default()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_keyword() {
        let table = RuleTable::builtin();
        assert_eq!(table.len(), 12);
        assert_eq!(table.lookup("pusing"), Some(Department::Neurology));
        assert_eq!(table.lookup("gusi berdarah"), Some(Department::Dentistry));
    }

    #[test]
    fn lookup_is_case_and_space_insensitive() {
        let table = RuleTable::builtin();
        assert_eq!(table.lookup("  Sakit   KEPALA "), Some(Department::Neurology));
        assert_eq!(table.lookup("Sesak Napas"), Some(Department::Pulmonology));
    }

    #[test]
    fn lookup_matches_whole_word_phrases() {
        let table = RuleTable::builtin();
        assert_eq!(
            table.lookup("sering batuk di malam hari"),
            Some(Department::Pulmonology)
        );
        // "mual" must not match inside another word
        assert_eq!(table.lookup("manual"), None);
    }

    #[test]
    fn lookup_ignores_punctuation() {
        let table = RuleTable::builtin();
        assert_eq!(table.lookup("batuk,"), Some(Department::Pulmonology));
        assert_eq!(table.lookup("pusing."), Some(Department::Neurology));
        assert_eq!(table.lookup("(sesak-napas)"), Some(Department::Pulmonology));
    }

    #[test]
    fn lookup_punctuated_list_prefers_longest_keyword() {
        let table = RuleTable::builtin();
        assert_eq!(table.lookup("sakit kepala, mual"), Some(Department::Neurology));
    }

    #[test]
    fn classify_punctuated_symptoms() {
        let table = RuleTable::builtin();
        assert_eq!(
            table.classify(&["Pusing!", "sulit berjalan."]),
            Department::Neurology
        );
    }

    #[test]
    fn lookup_prefers_longest_keyword() {
        let table = RuleTable::from_pairs([
            ("sakit", Department::InternalMedicine),
            ("sakit perut", Department::Gastroenterology),
        ])
        .unwrap();
        assert_eq!(
            table.lookup("sakit perut sejak pagi"),
            Some(Department::Gastroenterology)
        );
    }

    #[test]
    fn classify_neurology_example() {
        let table = RuleTable::builtin();
        let dept = table.classify(&["pusing", "mual", "sulit berjalan"]);
        assert_eq!(dept, Department::Neurology);
    }

    #[test]
    fn classify_tie_goes_to_first_vote() {
        let table = RuleTable::builtin();
        assert_eq!(table.classify(&["mual", "batuk"]), Department::Gastroenterology);
        assert_eq!(table.classify(&["batuk", "mual"]), Department::Pulmonology);
    }

    #[test]
    fn classify_ignores_unmatched_symptoms() {
        let table = RuleTable::builtin();
        let dept = table.classify(&["demam", "lelah", "batuk"]);
        assert_eq!(dept, Department::Pulmonology);
    }

    #[test]
    fn classify_defaults_to_general_medicine() {
        let table = RuleTable::builtin();
        assert_eq!(table.classify(&["demam"]), Department::GeneralMedicine);
        assert_eq!(table.classify::<&str>(&[]), Department::GeneralMedicine);
    }

    #[test]
    fn classify_is_deterministic() {
        let table = RuleTable::builtin();
        let symptoms = ["susah tidur", "menggigil", "memar di tangan"];
        let first = table.classify(&symptoms);
        for _ in 0..20 {
            assert_eq!(table.classify(&symptoms), first);
        }
        assert_eq!(first, Department::Psychiatry);
    }

    #[test]
    fn from_json_parses_department_names() {
        let table =
            RuleTable::from_json(r#"{"nyeri dada": "Cardiology", "Ruam": "dermatology"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("nyeri dada"), Some(Department::Cardiology));
        assert_eq!(table.lookup("ruam"), Some(Department::Dermatology));
    }

    #[test]
    fn from_json_rejects_unknown_department() {
        let err = RuleTable::from_json(r#"{"nyeri dada": "Oncology"}"#).unwrap_err();
        assert!(matches!(err, RuleTableError::UnknownDepartment { ref keyword, .. } if keyword == "nyeri dada"));
    }

    #[test]
    fn from_json_rejects_empty_and_malformed() {
        assert!(matches!(RuleTable::from_json("{}"), Err(RuleTableError::Empty)));
        assert!(matches!(RuleTable::from_json("[1, 2]"), Err(RuleTableError::Parse(_))));
        assert!(matches!(
            RuleTable::from_json(r#"{"  ": "Neurology"}"#),
            Err(RuleTableError::BlankKeyword)
        ));
    }

    #[test]
    fn rejects_keywords_that_normalize_alike() {
        let err = RuleTable::from_json(r#"{"Pusing": "Neurology", "pusing": "Psychiatry"}"#)
            .unwrap_err();
        assert!(matches!(err, RuleTableError::DuplicateKeyword(ref k) if k == "pusing"));

        let err = RuleTable::from_pairs([
            ("sakit  kepala", Department::Neurology),
            ("Sakit kepala.", Department::Neurology),
        ])
        .unwrap_err();
        assert!(matches!(err, RuleTableError::DuplicateKeyword(_)));
    }

    #[test]
    fn unknown_department_error_names_first_keyword() {
        for _ in 0..5 {
            let err = RuleTable::from_json(r#"{"zzz": "Oncology", "aaa": "Urology"}"#).unwrap_err();
            assert!(matches!(err, RuleTableError::UnknownDepartment { ref keyword, .. } if keyword == "aaa"));
        }
    }

    #[test]
    fn load_reports_missing_file() {
        let err = RuleTable::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, RuleTableError::Io { .. }));
    }
}
