//! Descriptive metadata for files

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Facet data attached to a file node, joined to the tree by node id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// One-paragraph summary, also used as the searchable body text
    pub summary: String,
    /// Short labels; duplicates collapse
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub date_modified: NaiveDate,
    /// Display size such as "2.4 MB"
    pub size: String,
}

impl FileMetadata {
    pub fn new(summary: impl Into<String>, date_modified: NaiveDate, size: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            tags: BTreeSet::new(),
            date_modified,
            size: size.into(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}
