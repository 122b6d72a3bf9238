use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::error::AppError;

/// A normalized email address: trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subject(String);

impl Subject {
    /// Normalize raw input. Blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Form-encoded for use as a URL path segment (`@` -> `%40`, space -> `+`).
    ///
    /// `*` is left as is and `~` becomes `%7E`; the service decodes either
    /// form to the same address.
    pub fn url_encoded(&self) -> String {
        url::form_urlencoded::byte_serialize(self.0.as_bytes()).collect()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// De-duplicate and sort normalized subjects from one-per-line text.
pub fn parse_subject_list(text: &str) -> Vec<Subject> {
    text.lines()
        .filter_map(Subject::parse)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn load_subject_list(path: &Path) -> Result<Vec<Subject>, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::SubjectList {
        path: path.to_path_buf(),
        source,
    })?;
    let subjects = parse_subject_list(&text);
    tracing::debug!("Loaded {} unique subject(s) from {}", subjects.len(), path.display());
    Ok(subjects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let s = Subject::parse("  Alice@Example.COM \n").unwrap();
        assert_eq!(s.as_str(), "alice@example.com");
        assert!(Subject::parse("   ").is_none());
    }

    #[test]
    fn test_url_encoded() {
        let s = Subject::parse("first+last@example.com").unwrap();
        assert_eq!(s.url_encoded(), "first%2Blast%40example.com");
        let s = Subject::parse("a b@x.com").unwrap();
        assert_eq!(s.url_encoded(), "a+b%40x.com");
    }

    #[test]
    fn test_url_encoded_star_and_tilde() {
        let s = Subject::parse("a*b~c@x.com").unwrap();
        assert_eq!(s.url_encoded(), "a*b%7Ec%40x.com");
    }

    #[test]
    fn test_list_dedups_case_insensitively_and_sorts() {
        let subjects = parse_subject_list("b@x.com\na@x.com\nA@x.com\n\n  a@X.com  \n");
        let names: Vec<_> = subjects.iter().map(Subject::as_str).collect();
        assert_eq!(names, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_load_subject_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");
        std::fs::write(&path, "a@x.com\r\nA@x.com\r\nb@x.com\r\n").unwrap();

        let subjects = load_subject_list(&path).unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].as_str(), "a@x.com");
        assert_eq!(subjects[1].as_str(), "b@x.com");
    }

    #[test]
    fn test_load_subject_list_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_subject_list(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, AppError::SubjectList { .. }));
    }
}
