//! Componentizer library for Grasshopper GhPython user objects
//!
//! This library turns component bundles (icon, code and metadata) into the
//! chunk trees the host stores in `.ghuser` files:
//! - Metadata validation and option resolution
//! - Code placeholder templating
//! - User-object chunk tree construction
//! - Encoding through an external chunk codec
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod chunk;
pub mod cli;
pub mod codec;
pub mod componentizer;
pub mod error;
pub mod metadata;
pub mod options;
pub mod source;
pub mod template;

// Re-export commonly used types
pub use error::{BundleError, CliError, ComponentizeError, Result, ValidationError};
