//! Query state snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use qd_data::{ChartKind, ResultPayload};

/// Lifecycle phase of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// A completed query kept in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// Text that was submitted
    pub query: String,

    /// Completion time
    pub timestamp: DateTime<Utc>,

    /// Copy of the payload returned for this query
    pub result: ResultPayload,
}

/// Everything the front-end renders
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryState {
    /// Input buffer, updated on every keystroke
    pub current_query: String,

    pub status: QueryStatus,

    /// User-facing error message
    pub error: Option<String>,

    /// Most recent result
    pub results: Option<ResultPayload>,

    /// Completed queries, most recent first
    pub history: Vec<QueryRecord>,

    /// Example queries offered to the user
    pub suggestions: Vec<String>,

    /// Explicit chart choice, overrides the payload hint
    pub visualization_type: ChartKind,
}

impl QueryState {
    /// Create an idle state offering the given suggestions
    pub fn with_suggestions(suggestions: Vec<String>) -> Self {
        Self {
            suggestions,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    /// Whether a submission of `query` would be accepted right now
    pub fn accepts_submission(&self, query: &str) -> bool {
        !self.is_loading() && !query.trim().is_empty()
    }

    /// Chart to draw for the current results, if any
    ///
    /// The explicit visualization type always wins over the payload hint.
    pub fn effective_chart(&self) -> Option<ChartKind> {
        self.results.as_ref().map(|_| self.visualization_type)
    }

    /// Serialize the history for export
    pub fn history_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = QueryState::default();

        assert_eq!(state.status, QueryStatus::Idle);
        assert_eq!(state.visualization_type, ChartKind::Bar);
        assert!(!state.is_loading());
        assert!(state.results.is_none());
        assert!(state.effective_chart().is_none());
    }

    #[test]
    fn test_accepts_submission() {
        let mut state = QueryState::default();

        assert!(state.accepts_submission("sales"));
        assert!(!state.accepts_submission(""));
        assert!(!state.accepts_submission(" \t\n"));

        state.status = QueryStatus::Loading;
        assert!(!state.accepts_submission("sales"));
    }

    #[test]
    fn test_empty_history_exports_as_array() {
        let state = QueryState::default();
        assert_eq!(state.history_json().unwrap(), "[]");
    }
}
