//! Source bundle discovery and loading.
//!
//! A source bundle is a directory holding `icon.png`, `code.py` and
//! `metadata.json`. Loading reads the three artifacts verbatim and runs the
//! metadata through its defaulting pass.

use crate::error::{BundleError, Result};
use crate::metadata::{self, ComponentMetadata};
use std::path::{Path, PathBuf};

/// Icon artifact file name.
pub const ICON_FILE: &str = "icon.png";
/// Code artifact file name.
pub const CODE_FILE: &str = "code.py";
/// Metadata artifact file name.
pub const METADATA_FILE: &str = "metadata.json";

/// Directory names never treated as bundles.
pub const SKIPPED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
];

/// A loaded and validated component bundle.
#[derive(Clone, Debug)]
pub struct SourceBundle {
    /// Bundle directory.
    pub directory: PathBuf,
    /// Raw icon bytes.
    pub icon: Vec<u8>,
    /// Untemplated code.
    pub code: String,
    /// Resolved metadata.
    pub metadata: ComponentMetadata,
}

impl SourceBundle {
    /// Name of the bundle directory; also the output file stem.
    pub fn directory_name(&self) -> String {
        bundle_name(&self.directory)
    }
}

/// Name of a bundle directory as used for output naming and reports.
pub fn bundle_name(directory: &Path) -> String {
    directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.display().to_string())
}

/// Loads and validates the bundle in `directory`.
///
/// Every artifact is checked for presence before any is read, so a bundle
/// missing several files reports the first missing one in
/// icon/code/metadata order.
pub async fn load_bundle(directory: &Path) -> Result<SourceBundle> {
    for artifact in [ICON_FILE, CODE_FILE, METADATA_FILE] {
        let path = directory.join(artifact);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(BundleError::MissingArtifact {
                artifact,
                directory: directory.to_path_buf(),
            }
            .into());
        }
    }

    let icon = tokio::fs::read(directory.join(ICON_FILE))
        .await
        .map_err(|source| unreadable(ICON_FILE, directory, source))?;
    let code = tokio::fs::read_to_string(directory.join(CODE_FILE))
        .await
        .map_err(|source| unreadable(CODE_FILE, directory, source))?;
    let json = tokio::fs::read_to_string(directory.join(METADATA_FILE))
        .await
        .map_err(|source| unreadable(METADATA_FILE, directory, source))?;

    let metadata = metadata::parse_metadata(&json)?;
    log::debug!(
        "Loaded bundle {}: {} icon bytes, {} code bytes, {} inputs, {} outputs",
        directory.display(),
        icon.len(),
        code.len(),
        metadata.ghpython.input_parameters.len(),
        metadata.ghpython.output_parameters.len()
    );

    Ok(SourceBundle {
        directory: directory.to_path_buf(),
        icon,
        code,
        metadata,
    })
}

fn unreadable(artifact: &'static str, directory: &Path, source: std::io::Error) -> BundleError {
    BundleError::Unreadable {
        artifact,
        directory: directory.to_path_buf(),
        source,
    }
}

/// Lists bundle directories directly below `source_dir`, sorted by name.
///
/// Version-control and cache directories are skipped, as are plain files.
pub fn discover_bundles(source_dir: &Path) -> Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("source directory not found: {}", source_dir.display()),
        )
        .into());
    }

    let mut bundles = Vec::new();

    for entry in walkdir::WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => io,
            None => std::io::Error::other("filesystem loop while listing bundles"),
        })?;

        // follow symlinked bundle directories
        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if SKIPPED_DIRS.contains(&name.as_ref()) {
            log::debug!("Skipping {}", entry.path().display());
            continue;
        }

        bundles.push(entry.into_path());
    }

    log::info!("Discovered {} bundles in {}", bundles.len(), source_dir.display());
    Ok(bundles)
}
