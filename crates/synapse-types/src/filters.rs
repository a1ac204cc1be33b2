//! Search request value types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection raised before a request reaches the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Which text a query is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    Filename,
    Content,
    #[default]
    Both,
}

impl SearchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchScope::Filename => "filename",
            SearchScope::Content => "content",
            SearchScope::Both => "both",
        }
    }
}

impl std::fmt::Display for SearchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filename" | "name" => Ok(SearchScope::Filename),
            "content" => Ok(SearchScope::Content),
            "both" | "" => Ok(SearchScope::Both),
            other => Err(format!(
                "unknown search scope '{}' (expected filename, content or both)",
                other
            )),
        }
    }
}

/// Independently clearable filter dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    DateFrom,
    DateTo,
    Directory,
    FileType,
}

/// Maps a raw facet selection to a present/absent value.
///
/// `None`, blank input and the `all` sentinel (any case) all mean
/// "facet absent".
pub fn facet_value(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(value.to_string())
    }
}

/// One search request: free-text query plus optional facets, ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub search_in: SearchScope,
}

impl SearchFilters {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.search_in = scope;
        self
    }

    pub fn with_date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn with_date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Set the directory facet; sentinel values leave it absent
    pub fn with_directory(mut self, directory: &str) -> Self {
        self.directory = facet_value(Some(directory));
        self
    }

    /// Set the file type facet; a leading `.` is dropped
    pub fn with_file_type(mut self, file_type: &str) -> Self {
        self.file_type = facet_value(Some(file_type.trim().trim_start_matches('.')));
        self
    }

    /// Re-apply sentinel mapping to every string facet
    pub fn normalized(mut self) -> Self {
        self.directory = facet_value(self.directory.as_deref());
        self.file_type = facet_value(
            self.file_type
                .as_deref()
                .map(|t| t.trim().trim_start_matches('.')),
        );
        self
    }

    /// True when the query is blank, i.e. no search was submitted
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_blank() {
            return Err(ValidationError("Search query is required".to_string()));
        }
        Ok(())
    }

    /// Number of facets currently set (query and scope excluded)
    pub fn active_facet_count(&self) -> usize {
        [
            self.date_from.is_some(),
            self.date_to.is_some(),
            self.directory.is_some(),
            self.file_type.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    pub fn clear_facet(&mut self, facet: Facet) {
        match facet {
            Facet::DateFrom => self.date_from = None,
            Facet::DateTo => self.date_to = None,
            Facet::Directory => self.directory = None,
            Facet::FileType => self.file_type = None,
        }
    }

    /// Drop every facet and reset the scope, keeping the query
    pub fn clear_facets(&mut self) {
        *self = Self::new(std::mem::take(&mut self.query));
    }

    /// Render the request as the assistant's seed prompt
    pub fn to_prompt(&self) -> String {
        let mut parts = Vec::new();
        if let Some(from) = self.date_from {
            parts.push(format!("from: {}", from));
        }
        if let Some(to) = self.date_to {
            parts.push(format!("to: {}", to));
        }
        if let Some(ref dir) = self.directory {
            parts.push(format!("dir: {}", dir));
        }
        if let Some(ref file_type) = self.file_type {
            parts.push(format!("type: {}", file_type));
        }
        if self.search_in != SearchScope::Both {
            parts.push(format!("in: {}", self.search_in));
        }

        let query = self.query.trim();
        if parts.is_empty() {
            query.to_string()
        } else {
            format!("{} [{}]", query, parts.join(", "))
        }
    }
}
