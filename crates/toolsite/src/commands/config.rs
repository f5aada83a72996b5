//! Configuration file (toolsite.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use toolsite_static::{BuildConfig, IndexStrategy};

pub const DEFAULT_CONFIG_FILE: &str = "toolsite.toml";

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_assets")]
    pub assets: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Template,
    Inline,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            output: default_output(),
            assets: default_assets(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            template: default_template(),
            title: default_title(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            stylesheet: default_stylesheet(),
        }
    }
}

fn default_root() -> String {
    ".".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_assets() -> String {
    "static".to_string()
}
fn default_template() -> String {
    "static/index.template.html".to_string()
}
fn default_title() -> String {
    "Tools".to_string()
}
fn default_stylesheet() -> String {
    "common.css".to_string()
}

impl ConfigFile {
    /// Build configuration with command-line overrides applied.
    pub fn into_build_config(self, output: Option<PathBuf>, inline: bool) -> BuildConfig {
        let strategy = if inline {
            Strategy::Inline
        } else {
            self.index.strategy
        };

        let index = match strategy {
            Strategy::Template => IndexStrategy::Template(PathBuf::from(&self.index.template)),
            Strategy::Inline => IndexStrategy::Inline {
                title: self.index.title,
            },
        };

        BuildConfig {
            root_dir: PathBuf::from(&self.site.root),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.site.output)),
            assets_dir: PathBuf::from(&self.site.assets),
            stylesheet: self.assets.stylesheet,
            index,
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}
