//! Attendee table rendering
//!
//! Scoring consumes people as one pipe-delimited text table with the fixed
//! columns name, role, company, background. Cell values never contain a raw
//! `|` or line break, otherwise the column layout would be ambiguous.

use crate::types::PersonRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header row
pub const HEADER: &str = "| Name | Role/Title | Affiliation/Company | Background |";

/// Separator row
pub const SEPARATOR: &str = "|------|------------|---------------------|------------|";

/// Default per-snippet character budget
pub const DEFAULT_SNIPPET_CHARS: usize = 200;

/// Default number of enrichment snippets folded into the background
pub const DEFAULT_MAX_SNIPPETS: usize = 3;

const ELLIPSIS: &str = "...";
const MISSING: &str = "N/A";

/// Rendered attendee table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendeeTable(String);

impl AttendeeTable {
    /// Table text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Number of data rows (header and separator excluded)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.0.lines().count().saturating_sub(2)
    }

    /// Consume into the underlying text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for AttendeeTable {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for AttendeeTable {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for AttendeeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the attendee table from person records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendeeTableBuilder {
    snippet_chars: usize,
    max_snippets: usize,
}

impl Default for AttendeeTableBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SNIPPET_CHARS, DEFAULT_MAX_SNIPPETS)
    }
}

impl AttendeeTableBuilder {
    /// Create a builder with the given snippet budget and count
    #[must_use]
    pub fn new(snippet_chars: usize, max_snippets: usize) -> Self {
        Self {
            snippet_chars,
            max_snippets,
        }
    }

    /// Display background for one person.
    ///
    /// Up to `max_snippets` enrichment snippets, each truncated, joined by a
    /// space; otherwise the truncated biography; otherwise empty.
    #[must_use]
    pub fn derive_background(&self, person: &PersonRecord) -> String {
        let snippets: Vec<String> = person
            .enrichment
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .take(self.max_snippets)
            .map(|s| self.truncate(s))
            .collect();

        if !snippets.is_empty() {
            return snippets.join(" ");
        }

        person
            .biography
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(|b| self.truncate(b))
            .unwrap_or_default()
    }

    /// Fill in `background` on every record, leaving source fields untouched
    pub fn annotate(&self, people: &mut [PersonRecord]) {
        for person in people.iter_mut() {
            person.background = Some(self.derive_background(person));
        }
    }

    /// Render the table; rows follow input order
    #[must_use]
    pub fn render(&self, people: &[PersonRecord]) -> AttendeeTable {
        let mut lines = Vec::with_capacity(people.len() + 2);
        lines.push(HEADER.to_string());
        lines.push(SEPARATOR.to_string());

        for person in people {
            let background = match &person.background {
                Some(bg) => bg.clone(),
                None => self.derive_background(person),
            };
            lines.push(format!(
                "| {} | {} | {} | {} |",
                cell(&person.name),
                cell(&person.title),
                cell(&person.affiliation),
                sanitize(&background),
            ));
        }

        AttendeeTable(lines.join("\n"))
    }

    /// Annotate then render
    pub fn build(&self, people: &mut [PersonRecord]) -> AttendeeTable {
        self.annotate(people);
        self.render(people)
    }

    fn truncate(&self, text: &str) -> String {
        if text.chars().count() <= self.snippet_chars {
            return text.to_string();
        }
        let cut: String = text.chars().take(self.snippet_chars).collect();
        format!("{}{ELLIPSIS}", cut.trim_end())
    }
}

/// Neutralize pipes and collapse all whitespace, line breaks included
fn sanitize(value: &str) -> String {
    value
        .replace('|', "/")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn cell(value: &str) -> String {
    let clean = sanitize(value);
    if clean.is_empty() {
        MISSING.to_string()
    } else {
        clean
    }
}
