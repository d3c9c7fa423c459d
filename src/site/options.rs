//! Options for replicating a source tree into an HTML site

use serde::{Deserialize, Serialize};

use crate::converter::ConvertOptions;
use crate::page::PageOptions;

/// What to do when a single entry cannot be processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the whole run at the first failure
    #[default]
    Abort,
    /// Record the failure, keep going, and fail the run at the end
    Continue,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Continue => write!(f, "continue"),
        }
    }
}

/// Site generation options; also the shape of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOptions {
    /// Files with this extension are converted, everything else is copied
    pub markup_extension: String,
    /// Extension given to converted files
    pub output_extension: String,
    pub on_error: ErrorPolicy,
    pub convert: ConvertOptions,
    pub page: PageOptions,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            markup_extension: "gmi".to_string(),
            output_extension: "html".to_string(),
            on_error: ErrorPolicy::Abort,
            convert: ConvertOptions::default(),
            page: PageOptions::default(),
        }
    }
}

impl SiteOptions {
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    pub fn with_convert_options(mut self, convert: ConvertOptions) -> Self {
        self.convert = convert;
        self
    }

    pub fn with_page_options(mut self, page: PageOptions) -> Self {
        self.page = page;
        self
    }

    /// Markup extension without a leading dot
    pub fn markup_extension(&self) -> &str {
        self.markup_extension.trim_start_matches('.')
    }

    /// Output extension without a leading dot
    pub fn output_extension(&self) -> &str {
        self.output_extension.trim_start_matches('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_policy_display() {
        assert_eq!(ErrorPolicy::Abort.to_string(), "abort");
        assert_eq!(ErrorPolicy::Continue.to_string(), "continue");
    }

    #[test]
    fn test_default_options() {
        let opts = SiteOptions::default();
        assert_eq!(opts.markup_extension(), "gmi");
        assert_eq!(opts.output_extension(), "html");
        assert_eq!(opts.on_error, ErrorPolicy::Abort);
        assert!(!opts.page.standalone);
    }

    #[test]
    fn test_extensions_strip_leading_dot() {
        let opts = SiteOptions {
            markup_extension: ".gemini".to_string(),
            output_extension: ".htm".to_string(),
            ..Default::default()
        };
        assert_eq!(opts.markup_extension(), "gemini");
        assert_eq!(opts.output_extension(), "htm");
    }

    #[test]
    fn test_options_builder() {
        let opts = SiteOptions::default()
            .with_error_policy(ErrorPolicy::Continue)
            .with_page_options(PageOptions::standalone());
        assert_eq!(opts.on_error, ErrorPolicy::Continue);
        assert!(opts.page.standalone);
    }
}
