//! Pure state transitions
//!
//! [`reduce`] maps a state and an [`Action`] to the next state. It never
//! performs I/O, reads the clock or touches randomness: completion actions
//! carry their timestamp and payload with them. Actions that are not valid
//! in the current phase leave the state unchanged.

use chrono::{DateTime, Utc};
use qd_data::{ChartKind, ResultPayload};

use crate::error::FABRICATION_FAILED_MESSAGE;
use crate::state::{QueryRecord, QueryState, QueryStatus};

/// Everything that can change a [`QueryState`]
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the input buffer
    SetCurrentQuery(String),

    /// Pick the chart used to show results
    SetVisualizationType(ChartKind),

    /// Drop the current results
    ClearResults,

    /// Show an arbitrary error message
    SetError(String),

    /// A query was accepted and fabrication has started
    Submitted { query: String },

    /// Fabrication finished
    Fulfilled {
        query: String,
        payload: ResultPayload,
        timestamp: DateTime<Utc>,
    },

    /// Fabrication failed
    Rejected,
}

impl Action {
    /// Whether this action is a lifecycle step rather than a user intent
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Action::Submitted { .. } | Action::Fulfilled { .. } | Action::Rejected
        )
    }
}

/// Apply one action
pub fn reduce(mut state: QueryState, action: &Action) -> QueryState {
    match action {
        Action::SetCurrentQuery(text) => {
            state.current_query = text.clone();
        }
        Action::SetVisualizationType(kind) => {
            state.visualization_type = *kind;
        }
        Action::ClearResults => {
            state.results = None;
        }
        Action::SetError(message) => {
            state.error = Some(message.clone());
        }
        Action::Submitted { query } => {
            if state.accepts_submission(query) {
                state.status = QueryStatus::Loading;
                state.error = None;
            }
        }
        Action::Fulfilled { query, payload, timestamp } => {
            if state.is_loading() {
                state.status = QueryStatus::Succeeded;
                state.results = Some(payload.clone());
                state.history.insert(
                    0,
                    QueryRecord {
                        query: query.clone(),
                        timestamp: *timestamp,
                        result: payload.clone(),
                    },
                );
            }
        }
        Action::Rejected => {
            if state.is_loading() {
                state.status = QueryStatus::Failed;
                state.error = Some(FABRICATION_FAILED_MESSAGE.to_string());
            }
        }
    }

    state
}
