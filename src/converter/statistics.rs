use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::line::Tag;

/// Counts gathered while converting one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatistics {
    /// Input lines, fences included
    pub total_lines: usize,
    /// Lines passed through inside preformatted blocks
    pub preformatted_lines: usize,
    /// Fence lines seen
    pub fences: usize,
    /// `<ul>` blocks opened
    pub lists: usize,
    /// Rendered lines per element name
    pub elements: BTreeMap<String, usize>,
    /// The document ended inside a preformatted block
    pub unterminated_fence: bool,
}

impl DocumentStatistics {
    pub fn increment_element(&mut self, tag: Tag) {
        *self.elements.entry(tag.name().to_string()).or_insert(0) += 1;
    }

    pub fn element_count(&self, tag: Tag) -> usize {
        self.elements.get(tag.name()).copied().unwrap_or(0)
    }

    /// Fold another document's counts into this one
    pub fn merge(&mut self, other: &DocumentStatistics) {
        self.total_lines += other.total_lines;
        self.preformatted_lines += other.preformatted_lines;
        self.fences += other.fences;
        self.lists += other.lists;
        for (name, count) in &other.elements {
            *self.elements.entry(name.clone()).or_insert(0) += count;
        }
        self.unterminated_fence |= other.unterminated_fence;
    }
}
