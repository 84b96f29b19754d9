//! Core functionality for the query dashboard
//!
//! This crate owns the query lifecycle: the state snapshot, the reducer that
//! moves it between phases, and the store that runs fabrication tasks.

pub mod config;
pub mod error;
pub mod reducer;
pub mod state;
pub mod store;
pub mod subscriber;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use error::{ConfigError, QueryError, FABRICATION_FAILED_MESSAGE};
pub use reducer::{reduce, Action};
pub use state::{QueryRecord, QueryState, QueryStatus};
pub use store::{QueryStore, Submission};
pub use subscriber::StoreSubscriber;

pub use qd_data::{ChartKind, Fabricator, MockFabricator, ResultPayload, Row, RowKey};
