//! Initialize a tools site in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::config::DEFAULT_CONFIG_FILE;

/// Run the init command.
pub fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing toolsite...");

    let created = scaffold(Path::new("."), yes)?;

    if created == 0 {
        tracing::warn!("Nothing to do, all files already exist. Use --yes to overwrite.");
        return Ok(());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Add tool pages as *.html next to {} and run 'toolsite build'.", DEFAULT_CONFIG_FILE);

    Ok(())
}

/// Write the starter files under `dir`, returning how many were written.
fn scaffold(dir: &Path, yes: bool) -> Result<usize> {
    let static_dir = dir.join("static");
    fs::create_dir_all(&static_dir).context("Failed to create static directory")?;

    let files = [
        (dir.join(DEFAULT_CONFIG_FILE), DEFAULT_CONFIG),
        (static_dir.join("index.template.html"), DEFAULT_TEMPLATE),
        (static_dir.join("common.css"), DEFAULT_STYLESHEET),
    ];

    let mut created = 0;
    for (path, content) in files {
        if path.exists() && !yes {
            tracing::debug!("Keeping existing {}", path.display());
            continue;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
        created += 1;
    }

    Ok(created)
}

const DEFAULT_CONFIG: &str = r#"# toolsite configuration

[site]
# Directory containing the tool pages (*.html)
root = "."

# Output directory, removed and rebuilt on every build
output = "dist"

# Shared assets, published to <output>/static
assets = "static"

[index]
# "template" fills $TOOL_LIST in the template file, "inline" uses a built-in page
strategy = "template"
template = "static/index.template.html"

# Page title for the inline index page
title = "Tools"

[assets]
# Stylesheet every tool page links to
stylesheet = "common.css"
"#;

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Tools</title>
    <link rel="stylesheet" href="static/common.css" />
    <link rel="icon" href="favicon.ico" />
  </head>
  <body>
    <main>
      <h1>Tools</h1>
      <ul class="tool-list">
$TOOL_LIST      </ul>
    </main>
  </body>
</html>
"#;

const DEFAULT_STYLESHEET: &str = r#":root {
  --background: #fdfdfd;
  --foreground: #1f2328;
  --accent: #0969da;
  --border: #d0d7de;
}

* {
  box-sizing: border-box;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
  max-width: 800px;
  margin: 0 auto;
  padding: 2rem 1rem;
}

a {
  color: var(--accent);
}

.tool-list {
  list-style: none;
  padding: 0;
}

.tool-list li {
  padding: 0.5rem 0;
  border-bottom: 1px solid var(--border);
}
"#;
