//! Command line interface for the componentizer.
//!
//! This module wires argument parsing, codec lookup and the run report
//! into the `componentize` binary.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::codec::ExternalCodec;
use crate::componentizer::{Componentizer, RunReport};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Executes a parsed command line.
///
/// Returns the process exit code: 0 when every bundle was written, 1 when
/// any bundle failed. A missing codec is returned as an error before any
/// bundle is touched.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime = RuntimeConfig::from(args);
    let settings = args.settings()?;

    runtime.section("GHPython componentizer")?;

    let codec = match ExternalCodec::locate(args.codec_lib.as_deref()) {
        Ok(codec) => codec,
        Err(e) => {
            // main reports the error itself
            runtime.indent("Cannot find the chunk codec! Aborting.")?;
            return Err(e);
        }
    };
    runtime.success(&format!("Chunk codec: {}", codec.program().display()))?;

    let componentizer = Componentizer::new(settings, codec);
    let bundles = componentizer.bundles()?;
    runtime.success(&format!(
        "Source: {} ({} components)",
        componentizer.settings().source_dir().display(),
        bundles.len()
    ))?;
    if bundles.is_empty() {
        runtime.warn("No component bundles found, nothing to do")?;
    }

    componentizer.prepare_target().await?;
    runtime.success(&format!(
        "Target: {}",
        componentizer.settings().target_dir().display()
    ))?;

    runtime.section("Processing component bundles")?;
    let report = componentizer
        .run_bundles(&bundles, |name| runtime.progress(name))
        .await?;
    print_report(&runtime, &report)?;

    Ok(if report.is_success() { 0 } else { 1 })
}

fn print_report(runtime: &RuntimeConfig, report: &RunReport) -> std::io::Result<()> {
    for component in &report.components {
        runtime.success(&format!("{} => {}", component.name, component.path.display()))?;
        runtime.indent(&format!("{} bytes, sha256 {}", component.size, component.checksum))?;
    }
    for failure in &report.failures {
        runtime.error(&format!("{}: {}", failure.name, failure.error))?;
    }

    runtime.output().summary(&format!(
        "{} written, {} failed",
        report.components.len(),
        report.failures.len()
    ))
}
