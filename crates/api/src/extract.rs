//! Extractors whose rejections render as [`AppError`] JSON bodies.
//!
//! Axum's stock `Json` and `Query` reject with plain-text bodies and, for
//! well-formed JSON of the wrong shape, a 422. These wrappers route every
//! rejection through `AppError::BadRequest` so clients always get a 400
//! with an `error` field.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with JSON error bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` with JSON error bodies.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
