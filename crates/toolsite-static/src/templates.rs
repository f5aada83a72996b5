//! Index page rendering.
//!
//! The listing page comes either from an external template document holding a
//! single `$TOOL_LIST` placeholder, or from a skeleton built into the binary
//! and rendered with minijinja.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use minijinja::{context, Environment};
use quick_xml::escape::escape;
use regex::{Captures, Regex};

use crate::builder::BuildError;
use crate::pages::ToolRecord;

/// Name of the substitution point in an index template.
pub const TOOL_LIST_PLACEHOLDER: &str = "TOOL_LIST";

/// `$$`, `$TOOL_LIST` or `${TOOL_LIST}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\$|TOOL_LIST\b|\{TOOL_LIST\})").expect("placeholder pattern is valid")
});

/// How the index page is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStrategy {
    /// Substitute the tool list into an external template document
    Template(PathBuf),
    /// Render the built-in skeleton
    Inline {
        /// Page title and heading
        title: String,
    },
}

impl Default for IndexStrategy {
    fn default() -> Self {
        Self::Template(PathBuf::from("static/index.template.html"))
    }
}

/// An index template loaded and checked before the build writes anything.
pub enum IndexTemplate {
    /// External template source
    File {
        /// Where the template was read from
        path: PathBuf,
        /// Template text
        source: String,
    },
    /// Built-in skeleton
    Inline {
        /// Page title and heading
        title: String,
        /// Href of the published stylesheet, relative to the site root
        stylesheet: String,
        env: Environment<'static>,
    },
}

impl IndexTemplate {
    /// Load the template for `strategy`.
    ///
    /// A missing template file is a [`BuildError::MissingTemplate`]; a template
    /// without exactly one placeholder is a [`BuildError::TemplateError`].
    pub fn load(strategy: &IndexStrategy, stylesheet: &str) -> Result<Self, BuildError> {
        match strategy {
            IndexStrategy::Template(path) => Self::from_file(path),
            IndexStrategy::Inline { title } => {
                let mut env = Environment::new();
                env.set_keep_trailing_newline(true);
                env.add_template("index.html", INLINE_TEMPLATE)
                    .map_err(|e| BuildError::TemplateError(e.to_string()))?;

                Ok(Self::Inline {
                    title: title.clone(),
                    stylesheet: stylesheet.to_string(),
                    env,
                })
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, BuildError> {
        if !path.is_file() {
            return Err(BuildError::MissingTemplate(path.to_path_buf()));
        }

        let source = fs::read_to_string(path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

        match count_placeholders(&source) {
            1 => Ok(Self::File {
                path: path.to_path_buf(),
                source,
            }),
            n => Err(BuildError::TemplateError(format!(
                "{}: expected exactly one ${} placeholder, found {}",
                path.display(),
                TOOL_LIST_PLACEHOLDER,
                n
            ))),
        }
    }

    /// Render the index page for `tools`, keeping their order.
    pub fn render(&self, tools: &[ToolRecord]) -> Result<String, BuildError> {
        let tool_list = render_tool_list(tools);

        match self {
            Self::File { source, .. } => Ok(substitute_tool_list(source, &tool_list)),
            Self::Inline {
                title,
                stylesheet,
                env,
            } => {
                let tmpl = env
                    .get_template("index.html")
                    .map_err(|e| BuildError::TemplateError(e.to_string()))?;

                tmpl.render(context! {
                    title => title,
                    stylesheet => escape(stylesheet.as_str()),
                    tool_list => tool_list,
                    tool_count => tools.len(),
                })
                .map_err(|e| BuildError::TemplateError(e.to_string()))
            }
        }
    }
}

/// Render one `<li>` per tool, linking its path with its title as text.
pub fn render_tool_list(tools: &[ToolRecord]) -> String {
    tools
        .iter()
        .map(|tool| {
            format!(
                "      <li><a href=\"{}\">{}</a></li>\n",
                escape(tool.path.as_str()),
                escape(tool.title.as_str())
            )
        })
        .collect()
}

/// Replace the tool list placeholder; `$$` becomes a literal `$`.
///
/// Any other `$` is left as written.
pub fn substitute_tool_list(template: &str, tool_list: &str) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            if &caps[0] == "$$" {
                "$".to_string()
            } else {
                tool_list.to_string()
            }
        })
        .into_owned()
}

fn count_placeholders(template: &str) -> usize {
    PLACEHOLDER
        .find_iter(template)
        .filter(|m| m.as_str() != "$$")
        .count()
}

const INLINE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{{ title }}</title>
  <link rel="stylesheet" href="{{ stylesheet | safe }}" />
  <link rel="icon" href="favicon.ico" />
</head>
<body>
  <main>
    <h1>{{ title }}</h1>
    <p class="tool-count">{{ tool_count }} tool{% if tool_count != 1 %}s{% endif %}</p>
    <ul class="tool-list">
{{ tool_list | safe }}    </ul>
  </main>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn record(name: &str, title: &str) -> ToolRecord {
        ToolRecord {
            name: name.to_string(),
            title: title.to_string(),
            path: format!("{}/", name),
        }
    }

    fn inline() -> IndexTemplate {
        IndexTemplate::load(
            &IndexStrategy::Inline {
                title: "Tools".to_string(),
            },
            "static/common.css",
        )
        .unwrap()
    }

    #[test]
    fn renders_list_items_in_order() {
        let list = render_tool_list(&[record("b", "Beta"), record("a", "Alpha")]);

        assert_eq!(
            list,
            "      <li><a href=\"b/\">Beta</a></li>\n      <li><a href=\"a/\">Alpha</a></li>\n"
        );
    }

    #[test]
    fn escapes_titles() {
        let list = render_tool_list(&[record("diff", "<Diff> & Merge")]);

        assert_eq!(
            list,
            "      <li><a href=\"diff/\">&lt;Diff&gt; &amp; Merge</a></li>\n"
        );
    }

    #[test]
    fn substitutes_placeholder_forms() {
        assert_eq!(substitute_tool_list("<ul>$TOOL_LIST</ul>", "X"), "<ul>X</ul>");
        assert_eq!(substitute_tool_list("<ul>${TOOL_LIST}</ul>", "X"), "<ul>X</ul>");
        assert_eq!(substitute_tool_list("cost: $$5 $TOOL_LIST", "X"), "cost: $5 X");
        assert_eq!(substitute_tool_list("$other $TOOL_LIST", "X"), "$other X");
    }

    #[test]
    fn template_file_renders_tools() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("index.template.html");
        fs::write(&path, "<ul>\n$TOOL_LIST</ul>\n").unwrap();

        let template = IndexTemplate::load(&IndexStrategy::Template(path), "").unwrap();
        let html = template
            .render(&[record("a", "Alpha"), record("b", "Beta")])
            .unwrap();

        assert_eq!(
            html,
            "<ul>\n      <li><a href=\"a/\">Alpha</a></li>\n      <li><a href=\"b/\">Beta</a></li>\n</ul>\n"
        );
    }

    #[test]
    fn template_file_renders_empty_list() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("index.template.html");
        fs::write(&path, "<ul>\n$TOOL_LIST</ul>\n").unwrap();

        let template = IndexTemplate::load(&IndexStrategy::Template(path), "").unwrap();

        assert_eq!(template.render(&[]).unwrap(), "<ul>\n</ul>\n");
    }

    #[test]
    fn missing_template_is_config_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nope.html");

        let result = IndexTemplate::load(&IndexStrategy::Template(path.clone()), "");

        assert!(matches!(result, Err(BuildError::MissingTemplate(p)) if p == path));
    }

    #[test]
    fn rejects_wrong_placeholder_count() {
        let temp = tempdir().unwrap();
        let none = temp.path().join("none.html");
        let twice = temp.path().join("twice.html");
        fs::write(&none, "<ul>$$TOOL_LIST</ul>").unwrap();
        fs::write(&twice, "$TOOL_LIST ${TOOL_LIST}").unwrap();

        assert!(matches!(
            IndexTemplate::load(&IndexStrategy::Template(none), ""),
            Err(BuildError::TemplateError(_))
        ));
        assert!(matches!(
            IndexTemplate::load(&IndexStrategy::Template(twice), ""),
            Err(BuildError::TemplateError(_))
        ));
    }

    #[test]
    fn inline_renders_tools() {
        let html = inline()
            .render(&[record("a", "Alpha"), record("b", "Beta")])
            .unwrap();

        assert!(html.contains("<title>Tools</title>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="static/common.css" />"#));
        assert!(html.contains("<p class=\"tool-count\">2 tools</p>"));
        let alpha = html.find(r#"<a href="a/">Alpha</a>"#).unwrap();
        let beta = html.find(r#"<a href="b/">Beta</a>"#).unwrap();
        assert!(alpha < beta);
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn inline_renders_empty_list() {
        let html = inline().render(&[]).unwrap();

        assert!(html.contains("<ul class=\"tool-list\">\n    </ul>"));
        assert!(!html.contains("<li>"));
        assert!(html.contains("0 tools"));
    }
}
