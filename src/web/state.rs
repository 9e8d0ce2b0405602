//! Shared state for the web boundary.

use crate::store::ResilientStore;

/// Application state handed to every handler.
///
/// The store (and its memoization table) is the only process-wide shared
/// state; everything else is per-request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: ResilientStore,
}

impl AppState {
    pub fn new(store: ResilientStore) -> Self {
        Self { store }
    }
}
