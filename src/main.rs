//! Componentize - builds Grasshopper user objects from GhPython bundles.
//!
//! This binary creates one `.ghuser` file per component bundle, reporting
//! per-bundle failures without aborting the batch.

use ghuser_componentizer::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
