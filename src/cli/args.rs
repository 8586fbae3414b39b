//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap,
//! with validation and conversion into run settings.

use crate::componentizer::{DEFAULT_EXTENSION, Settings, SettingsBuilder};
use clap::Parser;
use std::path::PathBuf;

/// Build Grasshopper user objects from GhPython component bundles
#[derive(Parser, Debug)]
#[command(
    name = "componentize",
    disable_version_flag = true,
    about = "Create GHUser components out of python code",
    long_about = "Creates one Grasshopper user-object file per component bundle.

Each subdirectory of SOURCE is a bundle holding icon.png, code.py and metadata.json.
Output is written to TARGET/<bundle>.ghuser; TARGET is created if missing.

Usage:
  componentize components build/ghuser
  componentize components build/ghuser --version 1.4.0
  componentize components build/ghuser --codec-lib ./lib

Exit code 0 = every bundle was written."
)]
pub struct Args {
    /// Source directory where code for all components is stored
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Target directory for ghuser files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// File or folder where the ghio-encode chunk codec is located
    ///
    /// Defaults to lib/ next to the executable, ./lib, then PATH.
    #[arg(long, value_name = "PATH", env = "COMPONENTIZE_CODEC_LIB")]
    pub codec_lib: Option<PathBuf>,

    /// Version to tag components with (replaces {{version}} in code)
    #[arg(long = "version", value_name = "STR")]
    pub tag_version: Option<String>,

    /// Extension of generated files
    #[arg(long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Only print errors and the final summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.source.as_os_str().is_empty() {
            return Err("Source cannot be empty".to_string());
        }
        if self.target.as_os_str().is_empty() {
            return Err("Target cannot be empty".to_string());
        }

        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(format!("Invalid extension: {:?}", self.extension));
        }

        if self.tag_version.as_deref().is_some_and(|v| v.contains(['\n', '\r'])) {
            return Err("Version cannot span multiple lines".to_string());
        }

        Ok(())
    }

    /// Builds run settings from the arguments.
    pub fn settings(&self) -> crate::error::Result<Settings> {
        SettingsBuilder::new()
            .source_dir(&self.source)
            .target_dir(&self.target)
            .maybe_version(self.tag_version.clone())
            .extension(self.extension.clone())
            .build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print error message
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.output.error(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
