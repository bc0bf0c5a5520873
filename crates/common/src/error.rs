//! Common error types for validatehound.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a bundle.
///
/// Validation problems are never reported through this type; they are
/// collected as data in the validator's report.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input must be a directory or a .zip file: {}", .0.display())]
    UnsupportedInput(PathBuf),

    #[error("Failed to load {}: {reason}", path.display())]
    LoaderFailure { path: PathBuf, reason: String },

    #[error("Failed to read entry {entry}: {reason}")]
    EntryRead { entry: String, reason: String },

    #[error("Failed to parse JSON file {filename}: {source}")]
    ParseFailure {
        filename: String,
        source: serde_json::Error,
    },

    #[error("Duplicate file name {name} in bundle: {first} and {second}")]
    DuplicateEntry {
        name: String,
        first: String,
        second: String,
    },

    #[error("Schema error: {0}")]
    Schema(String),
}

impl Error {
    /// True for I/O and container failures, including per-entry read
    /// failures and basename collisions.
    pub fn is_loader_failure(&self) -> bool {
        matches!(
            self,
            Error::LoaderFailure { .. } | Error::EntryRead { .. } | Error::DuplicateEntry { .. }
        )
    }

    /// Name of the file that failed to parse, if this is a parse failure.
    pub fn parse_filename(&self) -> Option<&str> {
        match self {
            Error::ParseFailure { filename, .. } => Some(filename),
            _ => None,
        }
    }

    /// Shorthand for a `LoaderFailure` on `path`.
    pub fn loader(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::LoaderFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_failure_class() {
        assert!(Error::loader("/tmp/x", "gone").is_loader_failure());
        assert!(Error::EntryRead {
            entry: "a/users.json".to_string(),
            reason: "crc".to_string(),
        }
        .is_loader_failure());
        assert!(!Error::UnsupportedInput(PathBuf::from("x.txt")).is_loader_failure());
    }

    #[test]
    fn test_parse_failure_names_file() {
        let cause = serde_json::from_str::<serde_json::Value>("{ nope }").unwrap_err();
        let err = Error::ParseFailure {
            filename: "bad.json".to_string(),
            source: cause,
        };
        assert_eq!(err.parse_filename(), Some("bad.json"));
        assert!(err.to_string().contains("bad.json"));
    }
}
