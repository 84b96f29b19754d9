//! Result payloads and the mock fabricator for the query dashboard
//!
//! A fabricator turns a natural-language question into a synthetic
//! [`ResultPayload`]. Only keyword matching is involved; nothing here
//! understands the query.

pub mod fabricator;
pub mod payload;

use thiserror::Error;

// Re-exports
pub use fabricator::{Fabricator, MockFabricator, RowShape, DEFAULT_FABRICATION_DELAY};
pub use payload::{ChartKind, ResultPayload, Row, RowKey};

/// Errors that can occur while fabricating a result
#[derive(Error, Debug)]
pub enum FabricationError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
