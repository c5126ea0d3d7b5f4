//! # Error Handling
//!
//! This module defines the error type shared by the `object-ops` library. It
//! uses `thiserror` to build a single `Error` enum covering every failure the
//! library can report, with messages meant to be shown to a user as-is.
//!
//! Most operations cannot fail. Resolving a missing path yields a fallback,
//! the matcher drops malformed rules, and the assign engine turns type
//! mismatches into overwrites. What remains is:
//!
//! - Path text that does not follow the grammar (`PathParse`).
//! - Mutable navigation that hits a scalar or a wildcard (`Navigate`).
//! - Configuration files that fail to deserialize (`ConfigParse`).
//! - Documents that cannot be parsed or rendered (`Document`).
//! - I/O, YAML, JSON and glob errors wrapped from their crates.

use std::fmt;

use thiserror::Error;

/// What went wrong while parsing a path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParseErrorKind {
    /// A `]` appeared without a preceding `[`.
    UnexpectedBracketClose,
    /// A `.` appeared between `[` and `]`.
    DotInsideBrackets,
    /// The input ended while a `[` was still open.
    UnterminatedBracket,
    /// Bracket content that is neither `*` nor a non-negative integer.
    InvalidIndex(String),
}

impl fmt::Display for PathParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedBracketClose => write!(f, "unexpected ']' without a matching '['"),
            Self::DotInsideBrackets => write!(f, "'.' is not allowed inside '[]'"),
            Self::UnterminatedBracket => write!(f, "unterminated '[', expected ']'"),
            Self::InvalidIndex(token) => write!(f, "invalid index '{}' inside '[]'", token),
        }
    }
}

/// Main error type for object-ops operations
#[derive(Error, Debug)]
pub enum Error {
    /// A path string did not follow the path grammar.
    ///
    /// `position` is the character offset of the offending character, or the
    /// length of the input for an unterminated bracket.
    #[error("Path parse error at {position}: {kind}")]
    PathParse {
        kind: PathParseErrorKind,
        position: usize,
    },

    /// Mutable navigation into a value failed.
    #[error("Cannot navigate to '{path}': {message}")]
    Navigate { path: String, message: String },

    /// An error occurred while parsing the `.object-ops.yaml` configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A document could not be parsed, rendered, or its format was unknown.
    #[error("Document error ({format}): {message}")]
    Document { format: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    pub(crate) fn path_parse(kind: PathParseErrorKind, position: usize) -> Self {
        Error::PathParse { kind, position }
    }

    /// The parse error kind, if this is a path parse error.
    pub fn path_parse_kind(&self) -> Option<&PathParseErrorKind> {
        match self {
            Error::PathParse { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
