//! Title extraction from hand-authored HTML.
//!
//! Tags are found with an event scan that only looks at start tags. Once the
//! first `<title>` opens, its body is read as raw text up to `</title>`, since
//! a title may hold a bare `&` or `<` that an XML reader would choke on.
//! Markup the reader cannot make sense of ends the scan instead of failing the
//! caller.

use std::sync::LazyLock;

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::{Captures, Regex};

/// Title used when a document has no usable `<title>`.
pub const DEFAULT_TITLE: &str = "Untitled Tool";

/// A named or numeric character reference.
static CHAR_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")
        .expect("character reference pattern is valid")
});

/// Extract the trimmed text of the first `<title>` element.
///
/// Returns [`DEFAULT_TITLE`] when the document has no title element, when the
/// title is empty or whitespace-only, or when the markup breaks down before a
/// title was opened.
pub fn extract_title(html: &str) -> String {
    find_title(html)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Scan for the first `<title>` and return its trimmed, entity-decoded text.
///
/// `None` means no title element was seen at all.
fn find_title(html: &str) -> Option<String> {
    let mut reader = create_html_reader(html);

    loop {
        match reader.read_event() {
            Ok(Event::Start(elem)) if is_title(elem.name().as_ref()) => {
                let body_start = reader.buffer_position() as usize;
                return Some(decode_text(title_body(html, body_start)));
            }
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(
                    "Stopped title scan at byte {}: {}",
                    reader.error_position(),
                    e
                );
                return None;
            }
        }
    }
}

fn create_html_reader(html: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader
}

fn is_title(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"title")
}

/// Raw title text from `start` up to the closing tag, or to the end of input
/// when the title is never closed.
fn title_body(html: &str, start: usize) -> &str {
    let rest = html.get(start..).unwrap_or("");
    // ASCII lowercasing keeps byte offsets intact.
    let end = rest
        .to_ascii_lowercase()
        .find("</title")
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Decode character references one at a time; unknown ones stay verbatim.
fn decode_text(raw: &str) -> String {
    let decoded = CHAR_REF.replace_all(raw, |caps: &Captures<'_>| {
        resolve_char_ref(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    decoded.trim().to_string()
}

fn resolve_char_ref(reference: &str) -> Option<String> {
    if let Some(number) = reference.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    resolve_html5_entity(reference).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_simple_title() {
        let html = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>  Color Picker  </title>
</head>
<body></body>
</html>"#;

        assert_eq!(extract_title(html), "Color Picker");
    }

    #[test]
    fn falls_back_without_title() {
        let html = "<html><head><meta charset=\"utf-8\"></head><body>Hi</body></html>";

        assert_eq!(extract_title(html), DEFAULT_TITLE);
        assert_eq!(find_title(html), None);
    }

    #[test]
    fn falls_back_on_blank_title() {
        assert_eq!(extract_title("<title></title>"), DEFAULT_TITLE);
        assert_eq!(extract_title("<title> \n\t </title>"), DEFAULT_TITLE);
    }

    #[test]
    fn only_first_title_counts() {
        let html = "<head><title>First</title></head><svg><title>Second</title></svg>";

        assert_eq!(extract_title(html), "First");
    }

    #[test]
    fn matches_tag_case_insensitively() {
        assert_eq!(extract_title("<HEAD><TITLE>Shouty</TITLE></HEAD>"), "Shouty");
    }

    #[test]
    fn decodes_entities() {
        let html = "<title>Find &amp; Replace &#8212; v2</title>";

        assert_eq!(extract_title(html), "Find & Replace \u{2014} v2");
    }

    #[test]
    fn keeps_unknown_entities_verbatim() {
        assert_eq!(extract_title("<title>A &bogus; B</title>"), "A &bogus; B");
    }

    #[test]
    fn decodes_html_entities_alongside_xml_ones() {
        assert_eq!(
            extract_title("<title>Q&amp;A &copy; 2024</title>"),
            "Q&A \u{a9} 2024"
        );
        assert_eq!(
            extract_title("<title>A&nbsp;B &amp; &unknown; C</title>"),
            "A\u{a0}B & &unknown; C"
        );
    }

    #[test]
    fn keeps_bare_ampersands() {
        assert_eq!(extract_title("<title>Tom & Jerry</title>"), "Tom & Jerry");
        assert_eq!(extract_title("<title>R&D Tools</title>"), "R&D Tools");
    }

    #[test]
    fn keeps_bare_angle_brackets() {
        assert_eq!(extract_title("<title>Less < More</title>"), "Less < More");
        assert_eq!(extract_title("<title>a<b</title>"), "a<b");
        assert_eq!(extract_title("<title>1 > 0</title>"), "1 > 0");
    }

    #[test]
    fn closing_tag_is_case_insensitive() {
        let html = "<head><Title>Mixed & Matched</TITLE><script>if (a < b && c) {}</script>";

        assert_eq!(extract_title(html), "Mixed & Matched");
    }

    #[test]
    fn tolerates_unclosed_void_elements() {
        let html = r#"<html><head><meta charset=utf-8><link rel=stylesheet href=x.css><title>Loose</title>"#;

        assert_eq!(extract_title(html), "Loose");
    }

    #[test]
    fn tolerates_garbage() {
        assert_eq!(extract_title(""), DEFAULT_TITLE);
        assert_eq!(extract_title("<<<>>> </ <!-- "), DEFAULT_TITLE);
        assert_eq!(extract_title("just some text"), DEFAULT_TITLE);
    }

    #[test]
    fn unterminated_title_uses_collected_text() {
        assert_eq!(extract_title("<head><title>Half done"), "Half done");
    }
}
