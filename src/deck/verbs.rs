use std::fmt;
use std::path::Path;

use crate::deck::{LoadError, read_deck};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VerbEntry {
    pub base: String,
    pub past: String,
    pub participle: String,
}

impl VerbEntry {
    pub fn new(
        base: impl Into<String>,
        past: impl Into<String>,
        participle: impl Into<String>,
    ) -> Self {
        Self {
            base: base.into(),
            past: past.into(),
            participle: participle.into(),
        }
    }

    /// Exactly three comma-separated fields, none empty after trimming.
    pub fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [base, past, participle]
                if !base.is_empty() && !past.is_empty() && !participle.is_empty() =>
            {
                Some(Self::new(*base, *past, *participle))
            }
            _ => None,
        }
    }
}

impl fmt::Display for VerbEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.base, self.past, self.participle)
    }
}

pub fn parse(text: &str) -> Vec<VerbEntry> {
    text.lines().filter_map(VerbEntry::parse_line).collect()
}

pub fn load(path: &Path) -> Result<Vec<VerbEntry>, LoadError> {
    let text = read_deck(path)?;
    let verbs = parse(&text);
    tracing::debug!(path = %path.display(), verbs = verbs.len(), "loaded irregular verbs");
    Ok(verbs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triples_and_trims() {
        let verbs = parse("go,went,gone\n be , was/were , been \n");
        assert_eq!(
            verbs,
            vec![
                VerbEntry::new("go", "went", "gone"),
                VerbEntry::new("be", "was/were", "been"),
            ]
        );
    }

    #[test]
    fn rejects_wrong_field_counts_and_blanks() {
        let text = "go,went\ngo,went,gone,extra\ngo,,gone\n,went,gone\n\nsee,saw,seen\n";
        assert_eq!(parse(text), vec![VerbEntry::new("see", "saw", "seen")]);
    }

    #[test]
    fn trailing_comma_counts_as_a_fourth_field() {
        assert!(VerbEntry::parse_line("go,went,gone,").is_none());
    }

    #[test]
    fn display_lists_all_forms() {
        assert_eq!(VerbEntry::new("go", "went", "gone").to_string(), "go, went, gone");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("irregular_verbs.txt");
        std::fs::write(&path, "go,went,gone\r\nbroken line\r\n").unwrap();
        assert_eq!(load(&path).unwrap(), vec![VerbEntry::new("go", "went", "gone")]);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("irregular_verbs.txt")),
            Err(LoadError::NotFound(_))
        ));
    }
}
