//! Search filter engine
//!
//! A pure function of (tree, filters): walks the tree in pre-order and keeps
//! every file that satisfies all present facets. Folders are containers only
//! and never appear in the result. There is no ranking; result order is
//! traversal order.

use crate::tree::{TreeModel, WalkEntry};
use chrono::NaiveDate;
use serde::Serialize;
use synapse_types::{FileMetadata, Node, SearchFilters, SearchScope};
use tracing::debug;

/// Which text the query was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Filename,
    Content,
}

/// A matching file
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub node: &'a Node,
    pub metadata: Option<&'a FileMetadata>,
    /// Display path from the root, e.g. `Workspace/Documents/Q4_Report.pdf`
    pub path: String,
    pub matched_in: MatchSource,
}

/// Evaluates [`SearchFilters`] against a [`TreeModel`]
pub struct SearchFilterEngine;

impl SearchFilterEngine {
    /// Run a search. A blank query yields no results.
    pub fn search<'a>(tree: &'a TreeModel, filters: &SearchFilters) -> Vec<SearchHit<'a>> {
        let Some(matcher) = Matcher::compile(filters) else {
            debug!("Blank query, skipping search");
            return Vec::new();
        };

        let hits: Vec<SearchHit<'a>> = tree
            .walk()
            .filter(|entry| entry.node.is_file())
            .filter_map(|entry| {
                let metadata = tree.metadata(&entry.node.id);
                matcher.evaluate(&entry, metadata).map(|matched_in| SearchHit {
                    node: entry.node,
                    metadata,
                    path: entry.display_path(),
                    matched_in,
                })
            })
            .collect();

        debug!("Search '{}' matched {} file(s)", filters.query, hits.len());
        hits
    }

    /// Ids of matching files, in traversal order
    pub fn matching_ids(tree: &TreeModel, filters: &SearchFilters) -> Vec<String> {
        Self::search(tree, filters)
            .into_iter()
            .map(|hit| hit.node.id.clone())
            .collect()
    }
}

/// Filters lowered once for case-insensitive comparison
struct Matcher {
    query: String,
    scope: SearchScope,
    directory: Option<String>,
    file_type: Option<String>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl Matcher {
    fn compile(filters: &SearchFilters) -> Option<Self> {
        let query = filters.query.trim();
        if query.is_empty() {
            return None;
        }

        Some(Self {
            query: query.to_lowercase(),
            scope: filters.search_in,
            directory: filters.directory.as_deref().map(str::to_lowercase),
            file_type: filters
                .file_type
                .as_deref()
                .map(|t| t.trim_start_matches('.').to_lowercase()),
            date_from: filters.date_from,
            date_to: filters.date_to,
        })
    }

    /// Facets first, then text. Returns where the query matched.
    fn evaluate(&self, entry: &WalkEntry<'_>, metadata: Option<&FileMetadata>) -> Option<MatchSource> {
        if !self.in_directory(entry) || !self.has_file_type(entry.node) || !self.in_date_range(metadata) {
            return None;
        }
        self.match_text(entry.node, metadata)
    }

    fn in_directory(&self, entry: &WalkEntry<'_>) -> bool {
        match self.directory {
            Some(ref dir) => entry
                .ancestors
                .iter()
                .any(|folder| folder.is_folder() && folder.name.to_lowercase() == *dir),
            None => true,
        }
    }

    fn has_file_type(&self, node: &Node) -> bool {
        match self.file_type {
            Some(ref wanted) => node
                .extension()
                .map(|ext| ext.to_lowercase() == *wanted)
                .unwrap_or(false),
            None => true,
        }
    }

    fn in_date_range(&self, metadata: Option<&FileMetadata>) -> bool {
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }
        // An unknown date cannot satisfy an active date filter
        let Some(date) = metadata.map(|m| m.date_modified) else {
            return false;
        };
        self.date_from.map_or(true, |from| date >= from) && self.date_to.map_or(true, |to| date <= to)
    }

    fn match_text(&self, node: &Node, metadata: Option<&FileMetadata>) -> Option<MatchSource> {
        let in_name = || node.name.to_lowercase().contains(&self.query);
        let in_content = || {
            metadata
                .map(|m| m.summary.to_lowercase().contains(&self.query))
                .unwrap_or(false)
        };

        match self.scope {
            SearchScope::Filename => in_name().then_some(MatchSource::Filename),
            SearchScope::Content => in_content().then_some(MatchSource::Content),
            SearchScope::Both => {
                if in_name() {
                    Some(MatchSource::Filename)
                } else if in_content() {
                    Some(MatchSource::Content)
                } else {
                    None
                }
            }
        }
    }
}
