//! Componentize run orchestration.
//!
//! # Overview
//!
//! For each bundle directory below the source directory the
//! [`Componentizer`]:
//! 1. Loads and validates the bundle ([`crate::source`])
//! 2. Substitutes code placeholders ([`crate::template`])
//! 3. Builds the user-object chunk tree ([`crate::chunk`])
//! 4. Encodes it through a [`ChunkCodec`](crate::codec::ChunkCodec)
//! 5. Writes `<bundle>.<extension>` into the target directory
//!
//! # Example
//!
//! ```no_run
//! use ghuser_componentizer::codec::ExternalCodec;
//! use ghuser_componentizer::componentizer::{Componentizer, SettingsBuilder};
//!
//! # async fn example() -> ghuser_componentizer::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .source_dir("components")
//!     .target_dir("build/ghuser")
//!     .build()?;
//!
//! let codec = ExternalCodec::locate(None)?;
//! let report = Componentizer::new(settings, codec).run().await?;
//!
//! for component in &report.components {
//!     println!("{} ({} bytes, sha256 {})", component.path.display(), component.size, component.checksum);
//! }
//! # Ok(())
//! # }
//! ```

mod orchestrator;
mod settings;

pub use orchestrator::{BundleFailure, Component, Componentizer, RunReport};
pub use settings::{DEFAULT_EXTENSION, Settings, SettingsBuilder};
