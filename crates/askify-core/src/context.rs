//! Explicit per-request context.
//!
//! There is no ambient "current user": whoever handles a request builds a
//! [`RequestContext`] and passes it to the operations that need it.

use uuid::Uuid;

/// Who a mutating request acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
  pub user_id: Uuid,
}

impl RequestContext {
  pub fn new(user_id: Uuid) -> Self { Self { user_id } }
}
