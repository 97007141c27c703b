//! Error types for Shibboleth operations.
//!
//! Input-validation outcomes are *not* errors — they are reported as
//! [`crate::types::Judgement`] statuses. The variants here are the
//! conditions that abort an operation.

use std::error::Error as StdError;
use std::fmt;

/// Result type for Shibboleth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during graph, scoring, or session operations.
#[derive(Debug, Clone)]
pub enum Error {
    /// A word is not in the vocabulary.
    WordNotFound(String),
    /// An edge operation between two known words found no edge — a
    /// completeness-invariant violation.
    EdgeNotFound(String, String),
    /// A resistance distance was requested between nodes that are not
    /// connected in the extracted subgraph. Indicates a threshold or
    /// graph-construction defect; the current judgement must abort
    /// rather than guess a distance.
    Disconnected { from: String, to: String },
    /// A challenge was requested from an empty vocabulary.
    EmptyVocabulary,
    /// A response was judged with no outstanding challenge.
    NoActiveChallenge,
    /// Persisted state failed validation on load.
    Corrupt(String),
    /// I/O errors (wrapped). Fatal to the session.
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WordNotFound(w) => write!(f, "word not found: {}", w),
            Error::EdgeNotFound(a, b) => write!(f, "edge not found: {} -- {}", a, b),
            Error::Disconnected { from, to } => {
                write!(f, "no path between {} and {} in the extracted subgraph", from, to)
            }
            Error::EmptyVocabulary => write!(f, "the vocabulary is empty"),
            Error::NoActiveChallenge => write!(f, "no challenge is outstanding"),
            Error::Corrupt(msg) => write!(f, "persisted state is corrupt: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl StdError for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

// Convenience constructors
impl Error {
    pub fn word_not_found(word: impl Into<String>) -> Self {
        Error::WordNotFound(word.into())
    }

    pub fn edge_not_found(a: impl Into<String>, b: impl Into<String>) -> Self {
        Error::EdgeNotFound(a.into(), b.into())
    }

    pub fn disconnected(from: impl Into<String>, to: impl Into<String>) -> Self {
        Error::Disconnected {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Error::Corrupt(msg.into())
    }
}
