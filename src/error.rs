//! Crate-wide error type.

use std::fmt;

use thiserror::Error;

use crate::config::loader::ConfigError;

/// The ways a data line can fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line does not match the line grammar.
    MalformedLine,
    /// Range endpoints differ in length, are out of order, or ranges on
    /// one line have different lengths.
    MalformedRange,
    /// A range endpoint contains something other than ASCII digits.
    NonDigitToken,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::MalformedLine => write!(f, "malformed line"),
            ParseErrorKind::MalformedRange => write!(f, "malformed range"),
            ParseErrorKind::NonDigitToken => write!(f, "non-digit token"),
        }
    }
}

/// Errors produced while reading, loading or looking up databases.
#[derive(Debug, Error)]
pub enum Error {
    /// A data line could not be parsed.
    #[error("line {line}: {kind}: {detail}")]
    Parse {
        line: usize,
        kind: ParseErrorKind,
        detail: String,
    },

    /// Indentation does not match any open nesting level.
    #[error("line {line}: indentation of {indent} spaces does not match an enclosing level")]
    Structure { line: usize, indent: usize },

    /// The backing resource could not be opened or read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A database name that cannot be mapped onto a resource.
    #[error("invalid database name {0:?}")]
    InvalidName(String),

    /// First load of a named database failed.
    #[error("failed to load database {name:?}: {source}")]
    Load {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The process-wide registry was already installed.
    #[error("global registry already initialized")]
    AlreadyInitialized,
}

impl Error {
    pub(crate) fn parse(line: usize, kind: ParseErrorKind, detail: impl Into<String>) -> Self {
        Error::Parse {
            line,
            kind,
            detail: detail.into(),
        }
    }

    /// The parse error kind, looking through `Load` wrappers.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Error::Parse { kind, .. } => Some(*kind),
            Error::Load { source, .. } => source.parse_kind(),
            _ => None,
        }
    }

    /// The 1-based line number the error refers to, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } | Error::Structure { line, .. } => Some(*line),
            Error::Load { source, .. } => source.line(),
            _ => None,
        }
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_wrapper_keeps_location() {
        let inner = Error::parse(7, ParseErrorKind::MalformedRange, "12-3");
        let err = Error::Load {
            name: "isbn".into(),
            source: Box::new(inner),
        };

        assert_eq!(err.line(), Some(7));
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::MalformedRange));
        let msg = err.to_string();
        assert!(msg.contains("isbn"));
        assert!(msg.contains("line 7"));
    }

    #[test]
    fn test_io_error_has_no_line() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.line(), None);
        assert_eq!(err.parse_kind(), None);
    }
}
