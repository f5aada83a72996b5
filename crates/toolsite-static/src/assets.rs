//! Output preparation and shared asset publishing.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::builder::BuildError;

/// Icon files that are also published at the site root when present.
pub const FAVICON_NAMES: &[&str] = &["favicon.ico", "favicon.png", "favicon.svg"];

/// Summary of a publish step.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishedAssets {
    /// Number of files copied into the assets subdirectory
    pub files: usize,

    /// Favicon file names copied to the output root
    pub favicons: Vec<String>,
}

/// Asset publishing utilities.
pub struct AssetPublisher;

impl AssetPublisher {
    /// Remove any previous output tree and recreate an empty output root.
    pub fn prepare_output(output_dir: &Path) -> Result<(), BuildError> {
        if output_dir.exists() {
            tracing::debug!("Removing previous output {}", output_dir.display());
            fs::remove_dir_all(output_dir).map_err(|e| {
                BuildError::WriteError(format!("{}: {}", output_dir.display(), e))
            })?;
        }

        fs::create_dir_all(output_dir)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", output_dir.display(), e)))
    }

    /// Copy `source` to `output_dir/<published_name>` and lift favicons to the root.
    ///
    /// A missing `source` directory publishes nothing.
    pub fn publish(
        source: &Path,
        output_dir: &Path,
        published_name: &str,
    ) -> Result<PublishedAssets, BuildError> {
        if !source.is_dir() {
            tracing::debug!("No assets directory at {}, skipping", source.display());
            return Ok(PublishedAssets::default());
        }

        let files = copy_dir_recursively(source, &output_dir.join(published_name))?;
        tracing::info!("Copied {}/ directory ({} files)", published_name, files);

        let mut favicons = Vec::new();
        for name in FAVICON_NAMES {
            let favicon = source.join(name);
            if favicon.is_file() {
                copy_file(&favicon, &output_dir.join(name))?;
                tracing::info!("Copied {} to output root", name);
                favicons.push(name.to_string());
            }
        }

        Ok(PublishedAssets { files, favicons })
    }
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursively(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| BuildError::ReadError(format!("{}: {}", src.display(), e)))?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target: PathBuf = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;
        } else {
            copy_file(entry.path(), &target)?;
            tracing::debug!("Copied asset {}", target.display());
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), BuildError> {
    fs::copy(src, dst).map(|_| ()).map_err(|e| {
        BuildError::WriteError(format!(
            "Failed to copy {} to {}: {}",
            src.display(),
            dst.display(),
            e
        ))
    })
}
