//! Plain-text deck files: `english - russian` word pairs and
//! `base,past,participle` irregular verbs.
//!
//! Loading is lenient. Lines that don't parse are dropped without complaint,
//! and an empty result is not an error here; callers decide what an empty
//! deck means.

pub mod dictionary;
pub mod verbs;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a deck file as UTF-8, dropping a leading byte-order mark.
pub(crate) fn read_deck(path: &Path) -> Result<String, LoadError> {
    match fs::read_to_string(path) {
        Ok(text) => match text.strip_prefix('\u{feff}') {
            Some(rest) => Ok(rest.to_string()),
            None => Ok(text),
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(LoadError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(LoadError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        match read_deck(&path) {
            Err(LoadError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn bom_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, "\u{feff}cat - кот\n").unwrap();
        assert_eq!(read_deck(&path).unwrap(), "cat - кот\n");
    }

    #[test]
    fn invalid_utf8_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, [0x63, 0x61, 0x74, 0x20, 0x2d, 0x20, 0xe9]).unwrap();
        assert!(matches!(read_deck(&path), Err(LoadError::Io { .. })));
    }
}
