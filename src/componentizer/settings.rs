//! Run settings and their builder.

use crate::error::{CliError, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Default extension of generated user-object files.
pub const DEFAULT_EXTENSION: &str = "ghuser";

/// Settings for one componentize run.
///
/// Constructed via [`SettingsBuilder`]; source and target directories are
/// always absolute.
///
/// # Examples
///
/// ```no_run
/// use ghuser_componentizer::componentizer::SettingsBuilder;
///
/// # fn example() -> ghuser_componentizer::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_dir("components")
///     .target_dir("build/ghuser")
///     .version("1.2.0")
///     .build()?;
/// assert!(settings.source_dir().is_absolute());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory holding one subdirectory per bundle.
    source_dir: PathBuf,

    /// Directory receiving the generated files.
    target_dir: PathBuf,

    /// Version tag substituted for `{{version}}`.
    ///
    /// None leaves the placeholder untouched.
    version: Option<String>,

    /// Extension of generated files, without the dot.
    extension: String,
}

impl Settings {
    /// Returns the source directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Returns the target directory.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Returns the version tag, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the output extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name of the output for a bundle directory named `bundle_name`.
    pub fn output_file_name(&self, bundle_name: &str) -> String {
        format!("{}.{}", bundle_name, self.extension)
    }

    /// Full output path for a bundle directory named `bundle_name`.
    pub fn output_path(&self, bundle_name: &str) -> PathBuf {
        self.target_dir.join(self.output_file_name(bundle_name))
    }
}

/// Builder for constructing [`Settings`].
#[derive(Default)]
pub struct SettingsBuilder {
    source_dir: Option<PathBuf>,
    target_dir: Option<PathBuf>,
    version: Option<String>,
    extension: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the source directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn target_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.target_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the version tag.
    ///
    /// Default: None
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the version tag from an optional value.
    pub fn maybe_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Sets the output extension; a leading dot is ignored.
    ///
    /// Default: `ghuser`
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `source_dir` or `target_dir` is missing, or if
    /// the extension is empty.
    pub fn build(self) -> Result<Settings> {
        let source_dir = self.source_dir.ok_or_else(|| missing("source_dir"))?;
        let target_dir = self.target_dir.ok_or_else(|| missing("target_dir"))?;

        let extension = self
            .extension
            .map(|ext| ext.trim_start_matches('.').to_string())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        if extension.is_empty() {
            return Err(CliError::InvalidArguments {
                reason: "output extension cannot be empty".to_string(),
            }
            .into());
        }

        Ok(Settings {
            source_dir: source_dir.absolutize()?.into_owned(),
            target_dir: target_dir.absolutize()?.into_owned(),
            version: self.version.filter(|v| !v.is_empty()),
            extension,
        })
    }
}

fn missing(field: &str) -> crate::error::ComponentizeError {
    CliError::InvalidArguments {
        reason: format!("{field} is required"),
    }
    .into()
}
