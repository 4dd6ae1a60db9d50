//! Search request types
//!
//! `SearchQuery` serializes directly into the service's request payload.

use serde::{Deserialize, Serialize};

/// Search precision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    /// Single-pass search
    #[default]
    Standard,
    /// Multi-step agentic search (slower, more thorough)
    Deep,
}

/// Shape of the returned payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputType {
    /// Natural-language answer plus sources
    #[default]
    SourcedAnswer,
    /// Raw result list
    SearchResults,
    /// Object matching `structured_output_schema`
    Structured,
}

/// A search request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Natural-language question
    pub q: String,
    /// Search depth
    pub depth: SearchDepth,
    /// Output type
    pub output_type: OutputType,
    /// JSON schema, required when `output_type` is structured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_output_schema: Option<serde_json::Value>,
    /// Include images in results
    pub include_images: bool,
    /// Earliest publication date (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    /// Latest publication date (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    /// Domains to exclude
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_domains: Vec<String>,
    /// Domains to restrict the search to
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_domains: Vec<String>,
    /// Inline citations in sourced answers
    pub include_inline_citations: bool,
    /// Attach sources to structured output
    pub include_sources: bool,
}

impl SearchQuery {
    /// Create a standard sourced-answer query
    #[must_use]
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    /// Use deep search
    #[must_use]
    pub fn deep(mut self) -> Self {
        self.depth = SearchDepth::Deep;
        self
    }

    /// Request a sourced answer with inline citations
    #[must_use]
    pub fn sourced_answer(mut self) -> Self {
        self.output_type = OutputType::SourcedAnswer;
        self.include_inline_citations = true;
        self
    }

    /// Request structured output matching `schema`, with sources attached
    #[must_use]
    pub fn structured(mut self, schema: serde_json::Value) -> Self {
        self.output_type = OutputType::Structured;
        self.structured_output_schema = Some(schema);
        self.include_sources = true;
        self
    }

    /// Restrict to the given domains (empty entries are dropped)
    #[must_use]
    pub fn with_include_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_domains.extend(
            domains
                .into_iter()
                .map(Into::into)
                .filter(|d: &String| !d.trim().is_empty()),
        );
        self
    }

    /// Exclude the given domains
    #[must_use]
    pub fn with_exclude_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_domains
            .extend(domains.into_iter().map(Into::into));
        self
    }

    /// Restrict results to a publication date window
    #[must_use]
    pub fn with_date_range(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.from_date = from;
        self.to_date = to;
        self
    }
}
