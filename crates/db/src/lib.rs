//! Project storage.
//!
//! Handlers and the query engine only see the [`ProjectRepo`] trait; the
//! concrete backend is chosen once at startup and injected through state.

pub mod repositories;

pub use repositories::{InMemoryProjectRepo, ProjectRepo};
