use std::fmt;
use std::path::Path;

use crate::deck::{LoadError, read_deck};

/// Separator between the English and Russian halves of a dictionary line.
pub const SEPARATOR: &str = " - ";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WordPair {
    pub english: String,
    pub russian: String,
}

impl WordPair {
    pub fn new(english: impl Into<String>, russian: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            russian: russian.into(),
        }
    }

    /// Split on the first separator only; both halves must be non-empty after trimming.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (english, russian) = line.split_once(SEPARATOR)?;
        let english = english.trim();
        let russian = russian.trim();
        if english.is_empty() || russian.is_empty() {
            return None;
        }
        Some(Self::new(english, russian))
    }
}

impl fmt::Display for WordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.english, self.russian)
    }
}

pub fn parse(text: &str) -> Vec<WordPair> {
    text.lines().filter_map(WordPair::parse_line).collect()
}

pub fn load(path: &Path) -> Result<Vec<WordPair>, LoadError> {
    let text = read_deck(path)?;
    let pairs = parse(&text);
    tracing::debug!(path = %path.display(), pairs = pairs.len(), "loaded dictionary");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_lines_in_order() {
        let pairs = parse("cat - кот\ndog - собака\n");
        assert_eq!(
            pairs,
            vec![WordPair::new("cat", "кот"), WordPair::new("dog", "собака")]
        );
    }

    #[test]
    fn malformed_lines_are_dropped() {
        let text = "cat - кот\n\nno separator here\n - пусто\nempty - \nwell-known - известный\ndash-only-no-spaces\n";
        let pairs = parse(text);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], WordPair::new("cat", "кот"));
        assert_eq!(pairs[1], WordPair::new("well-known", "известный"));
    }

    #[test]
    fn splits_on_first_separator_only() {
        let pair = WordPair::parse_line("make up - мириться - помириться").unwrap();
        assert_eq!(pair.english, "make up");
        assert_eq!(pair.russian, "мириться - помириться");
    }

    #[test]
    fn trims_both_halves_and_handles_crlf() {
        let pairs = parse("   to run   -   бежать  \r\nsun - солнце\r\n");
        assert_eq!(pairs[0], WordPair::new("to run", "бежать"));
        assert_eq!(pairs[1], WordPair::new("sun", "солнце"));
    }

    #[test]
    fn identity_is_case_sensitive() {
        assert_ne!(WordPair::new("Cat", "кот"), WordPair::new("cat", "кот"));
    }

    #[test]
    fn load_empty_file_is_ok_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.txt");
        std::fs::write(&path, "just some text\n").unwrap();
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("dictionary.txt")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(err.to_string().contains("dictionary.txt"));
    }
}
