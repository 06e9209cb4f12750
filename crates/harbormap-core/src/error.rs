//! Error types for harbormap-core

use thiserror::Error;

/// Result type alias for harbormap-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in harbormap-core
#[derive(Error, Debug)]
pub enum Error {
    /// The value's type is not among the accepted shapes for the target
    #[error("invalid type for {target}; expected {expected}, found {found}")]
    InvalidType {
        /// What was being converted (e.g. "shared volume")
        target: &'static str,
        /// Accepted type categories
        expected: &'static str,
        /// Actual type name of the value
        found: &'static str,
    },

    /// The value's type is accepted but its length is out of range
    #[error("invalid element length for {target}; expected length {expected}, found {found}")]
    InvalidShape {
        /// What was being converted
        target: &'static str,
        /// Accepted length range
        expected: &'static str,
        /// Actual length
        found: usize,
    },

    /// A YAML tag that is not registered as a resolvable placeholder
    #[error("unknown tag '!{tag}'; register it to accept resolvable values")]
    UnknownTag {
        /// Tag name without the leading `!`
        tag: String,
    },

    /// A YAML integer that does not fit in a signed 64-bit integer
    #[error("integer {value} is out of range")]
    IntegerOutOfRange {
        /// The integer as written
        value: String,
    },

    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration structure
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// A container field failed to normalize
    #[error("invalid '{field}' in container '{container}'")]
    InvalidContainer {
        /// Container name
        container: String,
        /// Field that failed
        field: &'static str,
        /// Underlying conversion error
        #[source]
        source: Box<Error>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_type(
        target: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::InvalidType {
            target,
            expected,
            found,
        }
    }

    pub(crate) fn invalid_shape(target: &'static str, expected: &'static str, found: usize) -> Self {
        Self::InvalidShape {
            target,
            expected,
            found,
        }
    }
}
