pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                 list (filter/sort), create
/// /projects/{id}            get, update, soft delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/projects", project::router())
}
