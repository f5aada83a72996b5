//! Tool discovery in the project root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::builder::BuildError;

/// Extension of tool documents.
pub const TOOL_EXTENSION: &str = "html";

/// Generated listing page, never treated as a tool.
pub const INDEX_FILE: &str = "index.html";

/// A tool document found in the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFile {
    /// Path of the source document
    pub path: PathBuf,

    /// File name without extension, used as the output directory name
    pub name: String,
}

impl ToolFile {
    fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_stem()?.to_string_lossy().into_owned();
        Some(Self {
            path: path.to_path_buf(),
            name,
        })
    }
}

/// List the tool documents directly inside `root`, sorted by file name.
///
/// Subdirectories are not scanned. A file named `index.html` in any letter
/// case is skipped since the listing page is generated.
pub fn discover_tools(root: &Path) -> Result<Vec<ToolFile>, BuildError> {
    if !root.is_dir() {
        return Err(BuildError::ReadError(format!(
            "Project root not found: {}",
            root.display()
        )));
    }

    let mut tools = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.map_err(|e| BuildError::ReadError(format!("{}: {}", root.display(), e)))?;
        let path = entry.path();

        if !path.is_file() || !is_tool_document(path) {
            continue;
        }

        if let Some(tool) = ToolFile::from_path(path) {
            tracing::debug!("Discovered tool {}", path.display());
            tools.push(tool);
        }
    }

    Ok(tools)
}

fn is_tool_document(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|f| f.to_str()) else {
        return false;
    };

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    ext == TOOL_EXTENSION && !file_name.eq_ignore_ascii_case(INDEX_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(tools: &[ToolFile]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn finds_html_files_sorted() {
        let temp = tempdir().unwrap();
        for name in ["zeta.html", "alpha.html", "mid.html"] {
            fs::write(temp.path().join(name), "<title>x</title>").unwrap();
        }

        let tools = discover_tools(temp.path()).unwrap();

        assert_eq!(names(&tools), vec!["alpha", "mid", "zeta"]);
        assert_eq!(tools[0].path, temp.path().join("alpha.html"));
    }

    #[test]
    fn skips_index_in_any_case() {
        let temp = tempdir().unwrap();
        for name in ["index.html", "Index.html", "INDEX.html", "tool.html"] {
            fs::write(temp.path().join(name), "").unwrap();
        }

        let tools = discover_tools(temp.path()).unwrap();

        assert_eq!(names(&tools), vec!["tool"]);
    }

    #[test]
    fn ignores_other_files_and_subdirectories() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();
        fs::write(temp.path().join("script.js"), "").unwrap();
        fs::write(temp.path().join("page.htm"), "").unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested").join("deep.html"), "").unwrap();
        fs::create_dir_all(temp.path().join("folder.html")).unwrap();
        fs::write(temp.path().join("real.html"), "").unwrap();

        let tools = discover_tools(temp.path()).unwrap();

        assert_eq!(names(&tools), vec!["real"]);
    }

    #[test]
    fn order_is_stable_across_runs() {
        let temp = tempdir().unwrap();
        for name in ["b.html", "c.html", "a.html", "B2.html"] {
            fs::write(temp.path().join(name), "").unwrap();
        }

        let first = discover_tools(temp.path()).unwrap();
        let second = discover_tools(temp.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(names(&first), vec!["B2", "a", "b", "c"]);
    }

    #[test]
    fn errors_on_missing_root() {
        let temp = tempdir().unwrap();

        let result = discover_tools(&temp.path().join("missing"));

        assert!(matches!(result, Err(BuildError::ReadError(_))));
    }
}
