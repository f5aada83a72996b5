//! Static site builder for standalone HTML tools.
//!
//! Publishes shared assets, rewrites each tool page into its own directory and
//! generates an index page listing every tool.

pub mod assets;
pub mod builder;
pub mod discovery;
pub mod pages;
pub mod templates;

pub use builder::{BuildConfig, BuildContext, BuildError, BuildResult, StaticBuilder};
pub use discovery::ToolFile;
pub use pages::ToolRecord;
pub use templates::{IndexStrategy, IndexTemplate, TOOL_LIST_PLACEHOLDER};
