//! Per-tool page generation.

use std::fs;
use std::path::Path;

use toolsite_html::{extract_title, rewrite_page, HeadLinks};

use crate::builder::BuildError;
use crate::discovery::ToolFile;

/// A built tool, as listed on the index page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ToolRecord {
    /// Tool name (source file stem)
    pub name: String,
    /// Extracted page title
    pub title: String,
    /// Link target relative to the site root
    pub path: String,
}

/// Rewrite one tool document into `output_dir/<name>/index.html`.
///
/// The tool directory is created fresh, so a name that collides with an
/// existing output entry is an error.
pub fn build_tool_page(
    tool: &ToolFile,
    output_dir: &Path,
    links: &HeadLinks,
) -> Result<ToolRecord, BuildError> {
    let html = fs::read_to_string(&tool.path)
        .map_err(|e| BuildError::ReadError(format!("{}: {}", tool.path.display(), e)))?;

    let title = extract_title(&html);
    let rewritten = rewrite_page(&html, links);

    let tool_dir = output_dir.join(&tool.name);
    fs::create_dir(&tool_dir)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", tool_dir.display(), e)))?;

    let page_path = tool_dir.join("index.html");
    fs::write(&page_path, rewritten)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", page_path.display(), e)))?;

    Ok(ToolRecord {
        path: format!("{}/", tool.name),
        name: tool.name.clone(),
        title,
    })
}
