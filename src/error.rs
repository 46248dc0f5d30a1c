//! Error taxonomy for the create pipeline.
//!
//! Every failure is local to one request. [`CreateError::status`] maps each
//! kind onto the HTTP status the service answers with.

use std::fmt;
use std::process::ExitStatus;
use thiserror::Error;

/// A request parameter that was missing a valid value.
///
/// `field` is always the query key (`max_size`, `spelling`, ...), so callers
/// can report it without parsing the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Text that cannot be represented in the requested single-byte charset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "cannot encode U+{code_point:04X} ({character:?}) in word {word:?} of {member} as {charset}"
)]
pub struct EncodingError {
    pub charset: &'static str,
    /// Which piece of output was being encoded (`README`, `words.txt`, `stdin`, ...).
    pub member: &'static str,
    pub word: String,
    pub character: char,
    pub code_point: u32,
}

/// The external builder that produced a [`PackagingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderName {
    Hunspell,
    Aspell,
}

impl fmt::Display for BuilderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderName::Hunspell => f.write_str("Hunspell"),
            BuilderName::Aspell => f.write_str("Aspell"),
        }
    }
}

/// Failure while running an external dictionary builder.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// The builder exited non-zero; `diagnostics` is its stderr, verbatim.
    #[error("{builder} dictionary generation failed ({status}): {diagnostics}")]
    Failed {
        builder: BuilderName,
        status: ExitStatus,
        diagnostics: String,
    },

    /// The builder could not be started at all.
    #[error("{builder} dictionary generation failed: cannot run {program}: {source}")]
    Spawn {
        builder: BuilderName,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The builder succeeded but left no artifact behind.
    #[error("{builder} dictionary generation failed: missing output {artifact}: {source}")]
    MissingArtifact {
        builder: BuilderName,
        artifact: String,
        #[source]
        source: std::io::Error,
    },

    /// Workspace setup or pipe I/O failed.
    #[error("{builder} dictionary generation failed: {source}")]
    Io {
        builder: BuilderName,
        #[source]
        source: std::io::Error,
    },
}

/// Failure reported by a [`crate::lexicon::LexicalDatabase`] backend.
#[derive(Debug, Error)]
#[error("lexical database query failed: {0}")]
pub struct LexiconError(pub String);

/// Any error the create pipeline can surface for a single request.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Packaging(#[from] PackagingError),

    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    /// Archive assembly or form rendering failed.
    #[error("output assembly failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("form rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl CreateError {
    /// HTTP status code for this failure.
    pub fn status(&self) -> u16 {
        match self {
            CreateError::Validation(_) => 400,
            CreateError::Encoding(_) => 422,
            CreateError::Packaging(_)
            | CreateError::Lexicon(_)
            | CreateError::Io(_)
            | CreateError::Template(_) => 500,
        }
    }

    /// The offending query key, for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CreateError::Validation(e) => Some(e.field),
            _ => None,
        }
    }
}

/// Convenience alias used across the pipeline.
pub type Result<T> = std::result::Result<T, CreateError>;
