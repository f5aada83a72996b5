//! HTML handling for standalone tool pages.
//!
//! This crate extracts page titles with a tolerant streaming scan and rewrites
//! the `<head>` of tool pages so they pick up the shared site assets.

pub mod rewrite;
pub mod title;

pub use rewrite::{has_icon_link, rewrite_page, HeadLinks};
pub use title::{extract_title, DEFAULT_TITLE};
