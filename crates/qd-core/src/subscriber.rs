//! Store subscriber trait

use crate::state::QueryState;

/// Trait for components that need to respond to store changes
pub trait StoreSubscriber: Send + Sync {
    /// Called after every state change with the new snapshot
    fn on_state_change(&self, state: &QueryState);
}
