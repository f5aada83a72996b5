//! Head rewriting for published tool pages.
//!
//! Every edit is a plain text substitution keyed on the literal `</head>`
//! marker, and every insertion is guarded by a presence check so rewriting an
//! already rewritten page changes nothing.

use std::sync::LazyLock;

use regex::Regex;

/// Closing head marker that insertions are anchored on.
const HEAD_CLOSE: &str = "</head>";

/// Matches a `<link>` whose `rel` contains the `icon` token, quoted or not.
static ICON_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<link\b[^>]*\brel\s*=\s*(?:"(?:[^"]*\s)?icon(?:\s[^"]*)?"|'(?:[^']*\s)?icon(?:\s[^']*)?'|icon(?:[\s/>]|$))"#,
    )
    .expect("icon link pattern is valid")
});

/// Link targets written into each tool page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadLinks {
    /// Sibling-relative stylesheet href used by the source pages
    pub legacy_stylesheet: String,
    /// Stylesheet href inside the published assets directory
    pub stylesheet: String,
    /// Href of the favicon at the site root
    pub favicon: String,
}

impl HeadLinks {
    /// Links for a page one directory below the site root.
    pub fn for_tool_page(assets_dir: &str, stylesheet: &str) -> Self {
        Self {
            legacy_stylesheet: format!("../{}", stylesheet),
            stylesheet: format!("../{}/{}", assets_dir, stylesheet),
            favicon: "../favicon.ico".to_string(),
        }
    }
}

impl Default for HeadLinks {
    fn default() -> Self {
        Self::for_tool_page("static", "common.css")
    }
}

/// Rewrite a tool page so it loads the published stylesheet and the site favicon.
pub fn rewrite_page(html: &str, links: &HeadLinks) -> String {
    let legacy = href_attr(&links.legacy_stylesheet);
    let published = href_attr(&links.stylesheet);

    let mut out = html.replace(&legacy, &published);

    if !out.contains(&published) {
        tracing::debug!("Inserting stylesheet link {}", links.stylesheet);
        out = insert_before_head_close(
            &out,
            &format!(r#"<link rel="stylesheet" href="{}" />"#, links.stylesheet),
        );
    }

    if !has_icon_link(&out) {
        tracing::debug!("Inserting favicon link {}", links.favicon);
        out = insert_before_head_close(
            &out,
            &format!(r#"<link rel="icon" href="{}" />"#, links.favicon),
        );
    }

    out
}

/// Whether the document already declares an icon link.
pub fn has_icon_link(html: &str) -> bool {
    ICON_LINK.is_match(html)
}

/// Insert `markup` on its own line before the first `</head>`.
///
/// Documents without a closing head are returned unchanged.
fn insert_before_head_close(html: &str, markup: &str) -> String {
    html.replacen(HEAD_CLOSE, &format!("  {}\n  {}", markup, HEAD_CLOSE), 1)
}

fn href_attr(href: &str) -> String {
    format!(r#"href="{}""#, href)
}
