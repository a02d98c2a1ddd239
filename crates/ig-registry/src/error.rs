//! Error types for registry operations

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The project has no single build output descriptor
    #[error("package not built: expected one ImplementationGuide*.json in {dir}, found {found}")]
    PackageNotBuilt {
        /// Directory that was searched
        dir: PathBuf,
        /// Number of matching descriptors
        found: usize,
    },

    /// The publication request descriptor does not exist
    #[error("publication request missing: {0}")]
    PublicationRequestMissing(PathBuf),

    /// A required descriptor field is absent
    #[error("missing field `{field}` in {descriptor}")]
    MissingField {
        /// Which descriptor was being read
        descriptor: &'static str,
        /// The absent key, as spelled in the file
        field: &'static str,
    },

    /// A descriptor field is present but its value cannot be used
    #[error("invalid field `{field}` in {descriptor}: {reason}")]
    InvalidField {
        /// Which descriptor was being read
        descriptor: &'static str,
        /// The offending key, as spelled in the file
        field: &'static str,
        /// What is wrong with the value
        reason: &'static str,
    },

    /// The package feed has never been initialized
    #[error("package feed missing, could not update: {0}")]
    FeedMissing(PathBuf),

    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A JSON document or descriptor does not match its schema
    #[error("malformed JSON document {path}: {source}")]
    Json {
        /// Offending file
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// The feed document is not well-formed or lacks required elements
    #[error("malformed feed document: {0}")]
    Xml(String),

    /// A feed timestamp is not in the expected format
    #[error("invalid feed date `{value}`: {source}")]
    InvalidDate {
        /// Text found in the document
        value: String,
        /// Underlying error
        source: chrono::ParseError,
    },

    /// The canonical URL cannot be derived from the build output URL
    #[error("cannot derive canonical base from `{0}`")]
    InvalidCanonical(String),
}

impl RegistryError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON error with the document it occurred in.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Wrap any XML reader/writer failure.
    pub fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
