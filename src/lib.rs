//! Gemtext to HTML conversion and static site generation.
//!
//! - [`line`] classifies and renders a single line.
//! - [`converter`] converts a whole document, tracking preformatted and
//!   list blocks.
//! - [`site`] mirrors a directory tree, converting `.gmi` documents and
//!   copying everything else.

pub mod config;
pub mod converter;
pub mod line;
pub mod page;
pub mod site;

pub use converter::{ConvertOptions, DocumentConverter, FenceMatch};
pub use line::{classify, classify_and_render, LineKind, RenderedLine, Tag};
pub use site::{ErrorPolicy, SiteGenerator, SiteOptions, SiteReport};
