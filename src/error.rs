//! Error types for componentizer operations.
//!
//! Errors are split by blast radius: [`BundleError`] and [`ValidationError`]
//! abort a single bundle, while [`ComponentizeError::CodecUnavailable`] aborts
//! the whole run before any bundle is touched.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for componentizer operations
pub type Result<T> = std::result::Result<T, ComponentizeError>;

/// Main error type for all componentizer operations
#[derive(Error, Debug)]
pub enum ComponentizeError {
    /// A bundle directory is missing an artifact or it could not be read
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    /// Metadata failed schema or option validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The external chunk encoder could not be located
    #[error(
        "Cannot find the chunk codec (ghio-encode) in: {}",
        .searched.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    CodecUnavailable {
        /// Locations that were searched
        searched: Vec<PathBuf>,
    },

    /// The external chunk encoder ran but failed to produce output
    #[error("Encoding failed: {reason}")]
    Encode {
        /// Reason for the error
        reason: String,
    },

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComponentizeError {
    /// Whether the run can move on to the next bundle after this error.
    ///
    /// Only a missing codec is fatal to the whole run.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::CodecUnavailable { .. })
    }
}

/// A required bundle artifact is missing or unreadable
#[derive(Error, Debug)]
pub enum BundleError {
    /// The artifact file does not exist in the bundle directory
    #[error("{artifact} missing, make sure {artifact} is present in the source bundle: {}", .directory.display())]
    MissingArtifact {
        /// File name of the artifact (e.g. `icon.png`)
        artifact: &'static str,
        /// Bundle directory
        directory: PathBuf,
    },

    /// The artifact exists but reading it failed
    #[error("failed to read {artifact} in source bundle {}: {source}", .directory.display())]
    Unreadable {
        /// File name of the artifact
        artifact: &'static str,
        /// Bundle directory
        directory: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// A metadata field failed validation
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required field is absent, null or empty
    #[error("missing required field '{field}'")]
    MissingField {
        /// Dotted path of the field (e.g. `ghpython.inputParameters[1].name`)
        field: String,
    },

    /// An enumerated field resolved to a value outside its valid set
    #[error("invalid {field} value ({value}). Valid values are [{}]", .valid.join(", "))]
    InvalidOption {
        /// Field name
        field: String,
        /// Value as supplied
        value: String,
        /// Sorted valid set
        valid: Vec<String>,
    },

    /// A field has a value of the right type that still cannot be used
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for the error
        reason: String,
    },

    /// The metadata document could not be parsed against the schema
    #[error("malformed metadata document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ValidationError {
    /// Name of the offending field, when one is known.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::InvalidOption { field, .. }
            | Self::InvalidValue { field, .. } => Some(field),
            Self::Malformed(_) => None,
        }
    }
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}
