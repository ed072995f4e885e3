//! Body and path extractors that reject with [`ApiError`].
//!
//! axum's own `Json` and `Path` reject with plain-text bodies (and 422 for
//! a well-formed body with missing fields). These wrappers keep every
//! malformed request on the JSON `{"error": ...}` contract with a 400.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// `axum::Json` with [`ApiError`] rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with [`ApiError`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
