//! Acting-user extractor.
//!
//! Mutating endpoints take a [`CurrentUser`], read from the
//! [`USER_HEADER`] request header, and hand its [`RequestContext`] down to
//! the service layer. Verifying that the caller really is that user is left
//! to whatever sits in front of the API.

use askify_core::context::RequestContext;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the acting user's UUID.
pub const USER_HEADER: &str = "x-askify-user";

/// Present in a handler means the request named a well-formed acting user.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub RequestContext);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let raw = parts
      .headers
      .get(USER_HEADER)
      .ok_or_else(|| ApiError::Unauthenticated(format!("missing {USER_HEADER} header")))?
      .to_str()
      .map_err(|_| ApiError::Unauthenticated(format!("{USER_HEADER} is not valid text")))?;

    let user_id = Uuid::parse_str(raw.trim())
      .map_err(|_| ApiError::Unauthenticated(format!("{USER_HEADER} is not a UUID")))?;

    Ok(CurrentUser(RequestContext::new(user_id)))
  }
}
