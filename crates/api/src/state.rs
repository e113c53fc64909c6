use std::sync::Arc;

use agrega_db::ProjectRepo;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Project storage backend.
    pub projects: Arc<dyn ProjectRepo>,
}
