//! Events: the named sessions that questions are asked under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A persisted event. Its questions are loaded separately by `event_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub event_id:   Uuid,
  pub name:       String,
  /// The user who created the event.
  pub user_id:    Uuid,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::AskifyStore::create_event`].
/// `event_id` and `created_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub name:    String,
  pub user_id: Uuid,
}

impl NewEvent {
  pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
    Self { name: name.into(), user_id }
  }

  /// Check invariants and return the input with its name trimmed.
  pub fn validate(self) -> Result<Self> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(Error::Validation { field: "name", reason: "must not be empty" });
    }
    Ok(Self { name: name.to_owned(), ..self })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validate_trims_name() {
    let input = NewEvent::new(Uuid::new_v4(), "  RustConf Q&A \n");
    assert_eq!(input.validate().unwrap().name, "RustConf Q&A");
  }

  #[test]
  fn validate_rejects_blank_name() {
    let err = NewEvent::new(Uuid::new_v4(), "   ").validate().unwrap_err();
    assert!(matches!(err, Error::Validation { field: "name", .. }));
  }
}
