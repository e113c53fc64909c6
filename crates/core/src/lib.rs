//! Agrega domain crate.
//!
//! Project model, wire enums, validation, and the query engine. No I/O and
//! no internal dependencies, so the storage and API crates both build on it.

pub mod enums;
pub mod error;
pub mod project;
pub mod query;
pub mod types;
pub mod validation;
