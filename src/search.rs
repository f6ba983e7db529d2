//! Owner-search flow: status line wording, term handling, outcomes.

use serde::Serialize;

/// Status line states for the owner-search panel.
///
/// `Searching` is the transient state the panel shows while the query is
/// in flight; the rest are terminal for one submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStatus {
    /// Blank input; no query was issued.
    Prompt,
    /// Query in flight.
    Searching,
    /// The term matched nothing.
    NoMatches,
    /// The term matched `count` parcels.
    Matches { count: usize },
    /// The service could not be reached or answered with an error.
    Failed,
}

impl SearchStatus {
    /// User-visible wording for the status line.
    pub fn message(&self) -> String {
        match self {
            SearchStatus::Prompt => "Enter owner, TMK, or address.".to_string(),
            SearchStatus::Searching => "Searching...".to_string(),
            SearchStatus::NoMatches => "No matches found.".to_string(),
            SearchStatus::Matches { count: 1 } => "1 match found.".to_string(),
            SearchStatus::Matches { count } => format!("{count} matches found."),
            SearchStatus::Failed => "Search failed. Try again.".to_string(),
        }
    }
}

/// One clickable result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// Id for the follow-up full fetch; rows without one are inert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<i64>,
    /// Server-rendered row markup.
    pub html: String,
}

/// Result of one owner-search submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Sequence token of the submit this outcome answers.
    pub seq: u64,
    /// A newer submit finished first; the panel must ignore this outcome.
    pub superseded: bool,
    pub status: SearchStatus,
    /// Status wording, precomputed for the panel.
    pub message: String,
    pub rows: Vec<ResultRow>,
}

impl SearchOutcome {
    pub fn new(seq: u64, status: SearchStatus, rows: Vec<ResultRow>) -> Self {
        let message = status.message();
        Self {
            seq,
            superseded: false,
            status,
            message,
            rows,
        }
    }

    pub fn superseded(seq: u64) -> Self {
        let status = SearchStatus::Searching;
        let message = status.message();
        Self {
            seq,
            superseded: true,
            status,
            message,
            rows: Vec::new(),
        }
    }
}

/// Trim the raw input; `None` means "show the prompt, query nothing".
pub fn normalize_term(raw: &str) -> Option<String> {
    let term = raw.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_wording_is_singular_and_plural() {
        assert_eq!(
            SearchStatus::Matches { count: 1 }.message(),
            "1 match found."
        );
        assert_eq!(
            SearchStatus::Matches { count: 14 }.message(),
            "14 matches found."
        );
        assert_eq!(SearchStatus::NoMatches.message(), "No matches found.");
        assert_eq!(
            SearchStatus::Prompt.message(),
            "Enter owner, TMK, or address."
        );
    }

    #[test]
    fn normalize_trims_and_rejects_blank() {
        assert_eq!(normalize_term("  Kahuku  "), Some("Kahuku".to_string()));
        assert_eq!(normalize_term("   "), None);
        assert_eq!(normalize_term(""), None);
        // Quote escaping is the query builder's job, not trimming's.
        assert_eq!(normalize_term("O'ahu"), Some("O'ahu".to_string()));
    }
}
