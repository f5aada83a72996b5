//! Site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use toolsite_static::StaticBuilder;

use super::config::load_config;

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>, inline: bool) -> Result<()> {
    tracing::info!("Building tools site...");

    let config = load_config(config_path)?.into_build_config(output, inline);

    let result = StaticBuilder::new(config)
        .build()
        .context("Build failed")?;

    tracing::info!(
        "Build complete! {} tool(s) built in {}ms.",
        result.tools,
        result.duration_ms
    );

    let output_dir = result
        .output_dir
        .canonicalize()
        .unwrap_or(result.output_dir);
    tracing::info!("Output directory: {}", output_dir.display());

    Ok(())
}
