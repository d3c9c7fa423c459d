//! Options controlling document conversion

use serde::{Deserialize, Serialize};

/// How a fence line is recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FenceMatch {
    /// The line must be exactly ```` ``` ````
    #[default]
    Exact,
    /// Any line starting with ```` ``` ```` toggles; the rest of the line is dropped
    Prefix,
}

impl std::fmt::Display for FenceMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FenceMatch::Exact => write!(f, "exact"),
            FenceMatch::Prefix => write!(f, "prefix"),
        }
    }
}

pub const FENCE_MARKER: &str = "```";

impl FenceMatch {
    pub fn is_fence(self, line: &str) -> bool {
        match self {
            FenceMatch::Exact => line == FENCE_MARKER,
            FenceMatch::Prefix => line.starts_with(FENCE_MARKER),
        }
    }
}

/// Options for converting one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub fence: FenceMatch,
    /// Emit `</pre>` when the document ends inside a preformatted block
    pub close_unterminated_fence: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            fence: FenceMatch::Exact,
            close_unterminated_fence: true,
        }
    }
}

impl ConvertOptions {
    pub fn new(fence: FenceMatch) -> Self {
        Self {
            fence,
            ..Self::default()
        }
    }

    pub fn with_close_unterminated_fence(mut self, close: bool) -> Self {
        self.close_unterminated_fence = close;
        self
    }
}
