//! Query store implementation
//!
//! The store owns the single [`QueryState`] instance. Intents are applied
//! synchronously through the reducer; a submission flips the state to
//! `Loading` under the same write lock that checks the guard, then runs the
//! fabricator on a spawned task and applies the outcome when it completes.

use std::sync::{Arc, Weak};
use chrono::Utc;
use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use qd_data::{ChartKind, Fabricator, ResultPayload};

use crate::config::DashboardConfig;
use crate::error::QueryError;
use crate::reducer::{reduce, Action};
use crate::state::QueryState;
use crate::subscriber::StoreSubscriber;

/// State and subscribers shared with in-flight fabrication tasks
struct Shared {
    state: RwLock<QueryState>,
    subscribers: RwLock<Vec<Weak<dyn StoreSubscriber>>>,
}

impl Shared {
    fn apply(&self, action: &Action) {
        {
            let mut state = self.state.write();
            let current = std::mem::take(&mut *state);
            *state = reduce(current, action);
        }

        if action.is_lifecycle() {
            debug!(?action, "Applied lifecycle action");
        }
        self.notify_subscribers();
    }

    fn notify_subscribers(&self) {
        let snapshot = self.state.read().clone();

        let live: Vec<Arc<dyn StoreSubscriber>> = {
            let mut subscribers = self.subscribers.write();

            // Remove any dead weak references
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for subscriber in live {
            subscriber.on_state_change(&snapshot);
        }
    }
}

/// An accepted query whose fabrication is running
#[derive(Debug)]
pub struct Submission {
    query: String,
    handle: JoinHandle<Result<ResultPayload, QueryError>>,
}

impl Submission {
    /// The submitted text
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the store to record the outcome
    pub async fn wait(self) -> Result<ResultPayload, QueryError> {
        self.handle.await?
    }
}

/// The query store
#[derive(Clone)]
pub struct QueryStore {
    shared: Arc<Shared>,
    fabricator: Arc<dyn Fabricator>,
    runtime: Handle,
}

impl QueryStore {
    /// Create a store backed by the given fabricator
    pub fn new(fabricator: Arc<dyn Fabricator>, suggestions: Vec<String>, runtime: Handle) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(QueryState::with_suggestions(suggestions)),
                subscribers: RwLock::new(Vec::new()),
            }),
            fabricator,
            runtime,
        }
    }

    /// Create a store using the mock fabricator described by `config`
    pub fn from_config(config: &DashboardConfig, runtime: Handle) -> Self {
        Self::new(
            Arc::new(config.mock_fabricator()),
            config.suggestions.clone(),
            runtime,
        )
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> QueryState {
        self.shared.state.read().clone()
    }

    /// Read the state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&QueryState) -> R) -> R {
        let state = self.shared.state.read();
        f(&*state)
    }

    pub fn is_loading(&self) -> bool {
        self.read(QueryState::is_loading)
    }

    /// Register a subscriber; it is dropped once the last strong reference goes away
    pub fn subscribe(&self, subscriber: Weak<dyn StoreSubscriber>) {
        self.shared.subscribers.write().push(subscriber);
    }

    /// Apply a user intent
    pub fn dispatch(&self, action: Action) {
        if action.is_lifecycle() {
            warn!(?action, "Lifecycle actions are driven by submit, ignoring");
            return;
        }
        self.shared.apply(&action);
    }

    pub fn set_current_query(&self, text: impl Into<String>) {
        self.dispatch(Action::SetCurrentQuery(text.into()));
    }

    pub fn set_visualization_type(&self, kind: ChartKind) {
        self.dispatch(Action::SetVisualizationType(kind));
    }

    pub fn clear_results(&self) {
        self.dispatch(Action::ClearResults);
    }

    pub fn set_error(&self, message: impl Into<String>) {
        self.dispatch(Action::SetError(message.into()));
    }

    /// Copy suggestion `index` into the input buffer
    pub fn select_suggestion(&self, index: usize) -> Option<String> {
        let suggestion = self.read(|state| state.suggestions.get(index).cloned())?;
        self.set_current_query(suggestion.clone());
        Some(suggestion)
    }

    /// Submit a query
    ///
    /// Returns `None` without touching the state when the query is blank or
    /// another submission is still loading.
    pub fn submit(&self, query: &str) -> Option<Submission> {
        {
            let mut state = self.shared.state.write();
            if !state.accepts_submission(query) {
                debug!(loading = state.is_loading(), "Rejected submission '{}'", query);
                return None;
            }
            let current = std::mem::take(&mut *state);
            *state = reduce(current, &Action::Submitted { query: query.to_string() });
        }

        info!(fabricator = self.fabricator.name(), "Processing query '{}'", query);
        self.shared.notify_subscribers();

        let shared = self.shared.clone();
        let fabricator = self.fabricator.clone();
        let task_query = query.to_string();
        let runtime = self.runtime.clone();

        let handle = self.runtime.spawn(async move {
            // A panic in the fabricator arrives here as a JoinError
            let inner_query = task_query.clone();
            let outcome = match runtime
                .spawn(async move { fabricator.fabricate(&inner_query).await })
                .await
            {
                Ok(result) => result.map_err(QueryError::from),
                Err(join) => Err(QueryError::TaskFailed(join)),
            };

            match &outcome {
                Ok(payload) => {
                    info!(rows = payload.rows.len(), "Query '{}' succeeded", task_query);
                    shared.apply(&Action::Fulfilled {
                        query: task_query,
                        payload: payload.clone(),
                        timestamp: Utc::now(),
                    });
                }
                Err(e) => {
                    warn!("Query '{}' failed: {}", task_query, e);
                    shared.apply(&Action::Rejected);
                }
            }

            outcome
        });

        Some(Submission {
            query: query.to_string(),
            handle,
        })
    }

    /// Run history entry `index` again
    pub fn rerun(&self, index: usize) -> Option<Submission> {
        let query = self.read(|state| {
            if state.is_loading() {
                None
            } else {
                state.history.get(index).map(|record| record.query.clone())
            }
        })?;

        self.set_current_query(query.clone());
        self.submit(&query)
    }
}
