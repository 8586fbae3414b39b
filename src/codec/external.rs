//! Chunk codec backed by an external encoder executable.
//!
//! The encoder reads one chunk tree as JSON on stdin and writes the
//! encoded bytes to stdout. A non-zero exit status is an encoding failure.

use super::ChunkCodec;
use crate::chunk::ChunkNode;
use crate::error::{ComponentizeError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// File stem of the encoder executable.
pub const CODEC_EXECUTABLE: &str = "ghio-encode";

/// Chunk codec that shells out to the encoder executable.
#[derive(Clone, Debug)]
pub struct ExternalCodec {
    program: PathBuf,
}

impl ExternalCodec {
    /// Uses `program` as the encoder without searching.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path of the encoder executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Locates the encoder.
    ///
    /// With `codec_lib` set, only that file or directory is searched.
    /// Otherwise `lib/` beside the running executable, `./lib` and finally
    /// `PATH` are tried in that order.
    pub fn locate(codec_lib: Option<&Path>) -> Result<Self> {
        let mut searched = Vec::new();

        if let Some(lib) = codec_lib {
            searched.push(lib.to_path_buf());
            return find_in(lib)
                .map(Self::new)
                .ok_or(ComponentizeError::CodecUnavailable { searched });
        }

        let exe_lib = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("lib")));
        let candidates = exe_lib.into_iter().chain(std::iter::once(PathBuf::from("lib")));

        for lib in candidates {
            if let Some(program) = find_in(&lib) {
                return Ok(Self::new(program));
            }
            searched.push(lib);
        }

        match which::which(CODEC_EXECUTABLE) {
            Ok(program) => {
                log::debug!("Found {} on PATH: {}", CODEC_EXECUTABLE, program.display());
                Ok(Self::new(program))
            }
            Err(e) => {
                log::debug!("{} not found on PATH: {}", CODEC_EXECUTABLE, e);
                searched.push(PathBuf::from("$PATH"));
                Err(ComponentizeError::CodecUnavailable { searched })
            }
        }
    }
}

fn is_codec_file_name(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    let stem = CODEC_EXECUTABLE.to_ascii_uppercase();
    upper == stem || upper == format!("{stem}.EXE")
}

/// Finds the encoder at `lib` itself or anywhere below it.
fn find_in(lib: &Path) -> Option<PathBuf> {
    if lib.is_file() {
        return Some(lib.to_path_buf());
    }
    if !lib.is_dir() {
        log::debug!("Codec directory not found: {}", lib.display());
        return None;
    }

    let found = walkdir::WalkDir::new(lib)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .find(|e| e.file_name().to_str().is_some_and(is_codec_file_name))
        .map(|e| e.into_path());

    if let Some(program) = &found {
        log::debug!("Found {} in {}: {}", CODEC_EXECUTABLE, lib.display(), program.display());
    }
    found
}

impl ChunkCodec for ExternalCodec {
    async fn encode(&self, chunk: &ChunkNode) -> Result<Vec<u8>> {
        let payload = serde_json::to_vec(chunk).map_err(|e| ComponentizeError::Encode {
            reason: format!("failed to serialize chunk '{}': {}", chunk.name(), e),
        })?;

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ComponentizeError::Encode {
                reason: format!("failed to start {}: {}", self.program.display(), e),
            })?;

        // stdin is fed from its own task while stdout and stderr drain
        let mut stdin = child.stdin.take().ok_or_else(|| ComponentizeError::Encode {
            reason: "encoder stdin was not captured".to_string(),
        })?;
        let writer = tokio::spawn(async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await?;

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::debug!("encoder closed stdin early: {}", e),
            Err(e) => log::debug!("stdin writer task failed: {}", e),
        }

        if !output.status.success() {
            return Err(ComponentizeError::Encode {
                reason: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(output.stdout)
    }
}
