//! Main application entry point

use std::sync::Arc;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use qd_core::{DashboardConfig, QueryState, QueryStore, StoreSubscriber, Submission};

mod command;
mod render;

use command::{Command, HELP};

/// Prints a loading line whenever a submission starts
struct LoadingIndicator;

impl StoreSubscriber for LoadingIndicator {
    fn on_state_change(&self, state: &QueryState) {
        if state.is_loading() {
            println!("Analyzing...");
        }
    }
}

/// Console front-end over one query store
struct Dashboard {
    store: QueryStore,
    _indicator: Arc<LoadingIndicator>,
}

impl Dashboard {
    fn new(store: QueryStore) -> Self {
        let indicator = Arc::new(LoadingIndicator);
        let weak = Arc::downgrade(&indicator);
        store.subscribe(weak);

        Self {
            store,
            _indicator: indicator,
        }
    }

    /// Handle one command; returns false when the user asked to quit
    async fn handle(&self, command: Command) -> Result<bool> {
        match command {
            Command::Ask(text) => {
                self.submit_and_show(&text).await;
            }
            Command::Visualize(kind) => {
                self.store.set_visualization_type(kind);
                self.show_results();
            }
            Command::Clear => {
                self.store.clear_results();
                self.show_results();
            }
            Command::History => {
                print!("{}", self.store.read(render::render_history));
            }
            Command::Rerun(position) => match self.store.rerun(position - 1) {
                Some(submission) => {
                    self.wait_and_show(submission).await;
                }
                None => println!("No history entry {}", position),
            },
            Command::Suggest(None) => {
                print!("{}", self.store.read(render::render_suggestions));
            }
            Command::Suggest(Some(position)) => match self.store.select_suggestion(position - 1) {
                Some(suggestion) => println!("Loaded: {}  (press enter on an empty line to run it)", suggestion),
                None => println!("No suggestion {}", position),
            },
            Command::Export => {
                let json = self.store.read(QueryState::history_json).context("Failed to export history")?;
                println!("{}", json);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }

    /// Submit `text`, or the current query buffer when `text` is blank
    async fn submit_and_show(&self, text: &str) {
        let query = if text.trim().is_empty() {
            self.store.read(|state| state.current_query.clone())
        } else {
            self.store.set_current_query(text);
            text.to_string()
        };

        let Some(submission) = self.store.submit(&query) else {
            println!("Nothing to run. Type a question or pick one with :suggest <n>.");
            return;
        };

        self.wait_and_show(submission).await;
    }

    /// Wait for a submission, log a failure and print the result area
    async fn wait_and_show(&self, submission: Submission) -> bool {
        let query = submission.query().to_string();
        let succeeded = match submission.wait().await {
            Ok(_) => true,
            Err(e) => {
                error!("Query '{}' failed: {}", query, e);
                false
            }
        };
        self.show_results();
        succeeded
    }

    fn show_results(&self) {
        print!("{}", self.store.read(render::render_results));
    }
}

fn load_config() -> Result<DashboardConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => DashboardConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

async fn run(store: QueryStore) -> Result<()> {
    let dashboard = Dashboard::new(store);

    println!("Analytics Dashboard: ask questions about your data in natural language.");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(command) => {
                if !dashboard.handle(command).await? {
                    break;
                }
            }
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let config = load_config()?;
    info!(
        delay_ms = config.fabrication_delay_ms,
        seed = ?config.rng_seed,
        "Starting query dashboard"
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let store = QueryStore::from_config(&config, runtime.handle().clone());

    runtime.block_on(run(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use qd_core::{MockFabricator, QueryStatus, ResultPayload};
    use qd_data::{FabricationError, Fabricator};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// Answers the first query, then reports the backend as down
    struct FlakyBackend {
        answered: AtomicBool,
        inner: MockFabricator,
    }

    #[async_trait]
    impl Fabricator for FlakyBackend {
        async fn fabricate(&self, query: &str) -> Result<ResultPayload, FabricationError> {
            if self.answered.swap(true, Ordering::SeqCst) {
                return Err(FabricationError::Unavailable("connection reset".to_string()));
            }
            self.inner.fabricate(query).await
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    fn flaky_dashboard() -> Dashboard {
        let backend = Arc::new(FlakyBackend {
            answered: AtomicBool::new(false),
            inner: MockFabricator::with_seed(Duration::ZERO, 4),
        });
        Dashboard::new(QueryStore::new(backend, Vec::new(), tokio::runtime::Handle::current()))
    }

    #[tokio::test]
    async fn test_rerun_failure_is_reported() {
        let dashboard = flaky_dashboard();

        let first = dashboard.store.submit("sales by region").unwrap();
        assert!(dashboard.wait_and_show(first).await);

        let rerun = dashboard.store.rerun(0).unwrap();
        assert!(!dashboard.wait_and_show(rerun).await);
        assert_eq!(dashboard.store.snapshot().status, QueryStatus::Failed);
    }

    #[tokio::test]
    async fn test_rerun_command_survives_failure() {
        let dashboard = flaky_dashboard();

        assert!(dashboard.handle(Command::Ask("top products".to_string())).await.unwrap());
        assert!(dashboard.handle(Command::Rerun(1)).await.unwrap());

        let state = dashboard.store.snapshot();
        assert_eq!(state.status, QueryStatus::Failed);
        assert_eq!(state.history.len(), 1);
    }
}
