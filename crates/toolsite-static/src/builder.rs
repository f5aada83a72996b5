//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use toolsite_html::HeadLinks;

use crate::assets::AssetPublisher;
use crate::discovery::{discover_tools, ToolFile, INDEX_FILE};
use crate::pages::{build_tool_page, ToolRecord};
use crate::templates::{IndexStrategy, IndexTemplate};

/// Configuration for building a tools site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the tool documents
    pub root_dir: PathBuf,

    /// Output directory, recreated on every build
    pub output_dir: PathBuf,

    /// Shared assets source directory (optional on disk)
    pub assets_dir: PathBuf,

    /// File name of the shared stylesheet inside the assets directory
    pub stylesheet: String,

    /// How the index page is produced
    pub index: IndexStrategy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            output_dir: PathBuf::from("dist"),
            assets_dir: PathBuf::from("static"),
            stylesheet: "common.css".to_string(),
            index: IndexStrategy::default(),
        }
    }
}

impl BuildConfig {
    /// Name of the assets subdirectory in the output tree.
    pub fn assets_name(&self) -> String {
        self.assets_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "static".to_string())
    }

    /// Links written into every tool page.
    pub fn head_links(&self) -> HeadLinks {
        HeadLinks::for_tool_page(&self.assets_name(), &self.stylesheet)
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of tools built
    pub tools: usize,

    /// Built tools in listing order
    pub records: Vec<ToolRecord>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read input: {0}")]
    ReadError(String),

    #[error("Index template not found: {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("Invalid index template: {0}")]
    TemplateError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// State threaded through the build stages.
#[derive(Debug)]
pub struct BuildContext<'a> {
    /// Output root
    pub output_dir: &'a Path,

    /// Assets source
    pub assets_dir: &'a Path,

    /// Links injected into tool pages
    pub links: HeadLinks,

    /// Discovered tool documents, sorted by file name
    pub tools: Vec<ToolFile>,

    /// Built tools, in discovery order
    pub records: Vec<ToolRecord>,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the site.
    ///
    /// Configuration problems are reported before the output directory is
    /// touched. After that any failure aborts the build and may leave a
    /// partially written output tree behind.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        self.validate()?;
        let index = IndexTemplate::load(
            &self.config.index,
            &format!("{}/{}", self.config.assets_name(), self.config.stylesheet),
        )?;

        let mut ctx = BuildContext {
            output_dir: &self.config.output_dir,
            assets_dir: &self.config.assets_dir,
            links: self.config.head_links(),
            tools: discover_tools(&self.config.root_dir)?,
            records: Vec::new(),
        };

        self.prepare_output(&ctx)?;
        self.publish_assets(&ctx)?;
        self.build_pages(&mut ctx)?;
        self.generate_index(&ctx, &index)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            tools: ctx.records.len(),
            records: ctx.records,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Refuse output locations whose removal would destroy inputs.
    fn validate(&self) -> Result<(), BuildError> {
        let output = &self.config.output_dir;

        if contains_or_equals(output, &self.config.root_dir) {
            return Err(BuildError::ConfigError(format!(
                "output directory {} would remove the project root",
                output.display()
            )));
        }

        if contains_or_equals(output, &self.config.assets_dir) {
            return Err(BuildError::ConfigError(format!(
                "output directory {} would remove the assets directory",
                output.display()
            )));
        }

        // Publishing would copy the output tree into itself.
        if self.config.assets_dir.is_dir() && contains_or_equals(&self.config.assets_dir, output) {
            return Err(BuildError::ConfigError(format!(
                "output directory {} is inside the assets directory {}",
                output.display(),
                self.config.assets_dir.display()
            )));
        }

        Ok(())
    }

    fn prepare_output(&self, ctx: &BuildContext<'_>) -> Result<(), BuildError> {
        AssetPublisher::prepare_output(ctx.output_dir)
    }

    fn publish_assets(&self, ctx: &BuildContext<'_>) -> Result<(), BuildError> {
        AssetPublisher::publish(ctx.assets_dir, ctx.output_dir, &self.config.assets_name())?;
        Ok(())
    }

    fn build_pages(&self, ctx: &mut BuildContext<'_>) -> Result<(), BuildError> {
        for tool in &ctx.tools {
            let record = build_tool_page(tool, ctx.output_dir, &ctx.links)?;
            tracing::info!("Built {} ({})", record.name, record.title);
            ctx.records.push(record);
        }

        Ok(())
    }

    fn generate_index(&self, ctx: &BuildContext<'_>, index: &IndexTemplate) -> Result<(), BuildError> {
        let html = index.render(&ctx.records)?;

        let index_path = ctx.output_dir.join(INDEX_FILE);
        fs::write(&index_path, html)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", index_path.display(), e)))?;

        match index {
            IndexTemplate::File { path, .. } => {
                tracing::info!("Generated {} from {}", INDEX_FILE, path.display());
            }
            IndexTemplate::Inline { .. } => {
                tracing::info!("Generated {} from built-in template", INDEX_FILE);
            }
        }

        Ok(())
    }
}

/// Whether `outer` is `inner` or one of its ancestors.
fn contains_or_equals(outer: &Path, inner: &Path) -> bool {
    resolve(inner).starts_with(resolve(outer))
}

/// Absolute form of `path`, resolving through the nearest existing ancestor
/// for paths that do not exist yet.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if parent.as_os_str().is_empty() => {
            resolve(Path::new(".")).join(name)
        }
        (Some(parent), Some(name)) => resolve(parent).join(name),
        _ => path.to_path_buf(),
    }
}
