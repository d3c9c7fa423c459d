//! Site generation
//!
//! Replicates a source directory into an output directory. Markup documents
//! are converted to HTML under the same relative path with the output
//! extension; every other file is copied byte for byte, and every directory
//! is recreated.

mod generator;
mod options;
mod report;

pub use generator::{SiteError, SiteGenerator};
pub use options::{ErrorPolicy, SiteOptions};
pub use report::{EntryAction, FailedEntry, ReportEntry, SiteReport};
