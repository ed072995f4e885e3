//! Question service: the store plus the ranking engine.
//!
//! Handlers talk to this rather than stitching store calls and scoring
//! together themselves. Mutations take an explicit [`RequestContext`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
  context::RequestContext,
  event::{Event, NewEvent},
  question::{NewQuestion, Question},
  score::{self, ScoredQuestion},
  store::{AskifyStore, StoreError},
  vote::{Vote, VoteKind},
};

/// Failure of a service operation: either a domain rule or the backend.
#[derive(Debug, Error)]
pub enum ServiceError<E: StoreError> {
  #[error(transparent)]
  Domain(#[from] crate::Error),

  #[error(transparent)]
  Store(E),
}

impl<E: StoreError> StoreError for ServiceError<E> {
  fn domain(&self) -> Option<&crate::Error> {
    match self {
      Self::Domain(e) => Some(e),
      Self::Store(e) => e.domain(),
    }
  }
}

/// An event with its questions, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetail {
  #[serde(flatten)]
  pub event:     Event,
  pub questions: Vec<ScoredQuestion>,
}

/// Borrowing wrapper over any [`AskifyStore`].
pub struct QuestionService<'a, S> {
  store: &'a S,
}

impl<'a, S: AskifyStore> QuestionService<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  pub async fn create_event(
    &self,
    ctx: &RequestContext,
    name: String,
  ) -> Result<Event, ServiceError<S::Error>> {
    let input = NewEvent::new(ctx.user_id, name).validate()?;
    self.store.create_event(input).await.map_err(ServiceError::Store)
  }

  /// Post a question under `event_id` as the acting user.
  pub async fn ask(
    &self,
    ctx: &RequestContext,
    event_id: Uuid,
    body: String,
  ) -> Result<Question, ServiceError<S::Error>> {
    let input = NewQuestion::new(event_id, ctx.user_id, body).validate()?;
    self.store.create_question(input).await.map_err(ServiceError::Store)
  }

  /// Questions under an event in ranked order.
  pub async fn ranked_questions(
    &self,
    event_id: Uuid,
  ) -> Result<Vec<ScoredQuestion>, ServiceError<S::Error>> {
    self
      .event_detail(event_id)
      .await?
      .map(|detail| detail.questions)
      .ok_or(ServiceError::Domain(crate::Error::EventNotFound(event_id)))
  }

  /// The event with its ranked questions, or `None` if it does not exist.
  pub async fn event_detail(
    &self,
    event_id: Uuid,
  ) -> Result<Option<EventDetail>, ServiceError<S::Error>> {
    let Some(event) = self.store.get_event(event_id).await.map_err(ServiceError::Store)?
    else {
      return Ok(None);
    };
    let questions = self
      .store
      .list_questions(event_id)
      .await
      .map_err(ServiceError::Store)?;

    Ok(Some(EventDetail { event, questions: score::rank_scored(&questions) }))
  }

  /// A single question with its current score.
  pub async fn scored_question(
    &self,
    question_id: Uuid,
  ) -> Result<Option<ScoredQuestion>, ServiceError<S::Error>> {
    let question = self
      .store
      .get_question(question_id)
      .await
      .map_err(ServiceError::Store)?;
    Ok(question.map(|q| ScoredQuestion { score: q.score(), question: q }))
  }

  /// Record the acting user's vote.
  pub async fn vote(
    &self,
    ctx: &RequestContext,
    question_id: Uuid,
    kind: VoteKind,
  ) -> Result<Vote, ServiceError<S::Error>> {
    self
      .store
      .record_vote(ctx.user_id, question_id, kind)
      .await
      .map_err(ServiceError::Store)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use chrono::Utc;

  use super::*;

  /// Minimal in-memory backend honouring the store contract.
  #[derive(Default)]
  struct MemoryStore {
    events:    Mutex<Vec<Event>>,
    questions: Mutex<Vec<Question>>,
    votes:     Mutex<Vec<Vote>>,
  }

  impl MemoryStore {
    fn tally(&self, mut q: Question) -> Question {
      let id = q.question_id;
      let votes = self.votes.lock().unwrap();
      let mine = votes.iter().filter(|v| v.question_id == id);
      q.upvotes = mine.clone().filter(|v| v.kind == VoteKind::Upvote).count() as u64;
      q.downvotes = mine.filter(|v| v.kind == VoteKind::Downvote).count() as u64;
      q
    }
  }

  impl AskifyStore for MemoryStore {
    type Error = crate::Error;

    async fn create_event(&self, input: NewEvent) -> crate::Result<Event> {
      let input = input.validate()?;
      let event = Event {
        event_id:   Uuid::new_v4(),
        name:       input.name,
        user_id:    input.user_id,
        created_at: Utc::now(),
      };
      self.events.lock().unwrap().push(event.clone());
      Ok(event)
    }

    async fn get_event(&self, event_id: Uuid) -> crate::Result<Option<Event>> {
      let events = self.events.lock().unwrap();
      Ok(events.iter().find(|e| e.event_id == event_id).cloned())
    }

    async fn list_events(&self) -> crate::Result<Vec<Event>> {
      Ok(self.events.lock().unwrap().clone())
    }

    async fn create_question(&self, input: NewQuestion) -> crate::Result<Question> {
      let input = input.validate()?;
      if self.get_event(input.event_id).await?.is_none() {
        return Err(crate::Error::EventNotFound(input.event_id));
      }
      let question = Question {
        question_id: Uuid::new_v4(),
        event_id:    input.event_id,
        user_id:     input.user_id,
        body:        input.body,
        created_at:  Utc::now(),
        upvotes:     0,
        downvotes:   0,
      };
      self.questions.lock().unwrap().push(question.clone());
      Ok(question)
    }

    async fn get_question(&self, question_id: Uuid) -> crate::Result<Option<Question>> {
      let found = self
        .questions
        .lock()
        .unwrap()
        .iter()
        .find(|q| q.question_id == question_id)
        .cloned();
      Ok(found.map(|q| self.tally(q)))
    }

    async fn list_questions(&self, event_id: Uuid) -> crate::Result<Vec<Question>> {
      let mine: Vec<Question> = self
        .questions
        .lock()
        .unwrap()
        .iter()
        .filter(|q| q.event_id == event_id)
        .cloned()
        .collect();
      Ok(mine.into_iter().map(|q| self.tally(q)).collect())
    }

    async fn record_vote(
      &self,
      user_id: Uuid,
      question_id: Uuid,
      kind: VoteKind,
    ) -> crate::Result<Vote> {
      if self.get_question(question_id).await?.is_none() {
        return Err(crate::Error::QuestionNotFound(question_id));
      }
      let mut votes = self.votes.lock().unwrap();
      if votes.iter().any(|v| v.user_id == user_id && v.question_id == question_id) {
        return Err(crate::Error::DuplicateVote { user_id, question_id });
      }
      let vote = Vote {
        vote_id: Uuid::new_v4(),
        user_id,
        question_id,
        kind,
        created_at: Utc::now(),
      };
      votes.push(vote.clone());
      Ok(vote)
    }

    async fn count_upvotes(&self, question_id: Uuid) -> crate::Result<u64> {
      Ok(self.get_question(question_id).await?.map_or(0, |q| q.upvotes))
    }

    async fn count_downvotes(&self, question_id: Uuid) -> crate::Result<u64> {
      Ok(self.get_question(question_id).await?.map_or(0, |q| q.downvotes))
    }
  }

  fn ctx() -> RequestContext { RequestContext::new(Uuid::new_v4()) }

  #[tokio::test]
  async fn event_detail_ranks_questions() {
    let store = MemoryStore::default();
    let svc = QuestionService::new(&store);
    let owner = ctx();

    let event = svc.create_event(&owner, "All hands".into()).await.unwrap();
    let quiet = svc.ask(&owner, event.event_id, "Quiet one".into()).await.unwrap();
    let loved = svc.ask(&owner, event.event_id, "Loved one".into()).await.unwrap();
    let hated = svc.ask(&owner, event.event_id, "Hated one".into()).await.unwrap();

    for _ in 0..5 {
      svc.vote(&ctx(), loved.question_id, VoteKind::Upvote).await.unwrap();
      svc.vote(&ctx(), hated.question_id, VoteKind::Downvote).await.unwrap();
    }
    svc.vote(&ctx(), quiet.question_id, VoteKind::Upvote).await.unwrap();

    let detail = svc.event_detail(event.event_id).await.unwrap().unwrap();
    assert_eq!(detail.event, event);
    let order: Vec<Uuid> = detail.questions.iter().map(|sq| sq.question.question_id).collect();
    assert_eq!(order, [loved.question_id, quiet.question_id, hated.question_id]);
    assert_eq!(detail.questions[0].question.upvotes, 5);
  }

  #[tokio::test]
  async fn unknown_event() {
    let store = MemoryStore::default();
    let svc = QuestionService::new(&store);
    let missing = Uuid::new_v4();

    assert!(svc.event_detail(missing).await.unwrap().is_none());
    let err = svc.ranked_questions(missing).await.unwrap_err();
    assert!(matches!(err.domain(), Some(crate::Error::EventNotFound(id)) if *id == missing));
  }

  #[tokio::test]
  async fn second_vote_is_rejected_and_tally_unchanged() {
    let store = MemoryStore::default();
    let svc = QuestionService::new(&store);
    let voter = ctx();

    let event = svc.create_event(&voter, "Town hall".into()).await.unwrap();
    let q = svc.ask(&voter, event.event_id, "Budget?".into()).await.unwrap();

    svc.vote(&voter, q.question_id, VoteKind::Upvote).await.unwrap();
    for kind in [VoteKind::Upvote, VoteKind::Downvote] {
      let err = svc.vote(&voter, q.question_id, kind).await.unwrap_err();
      assert!(matches!(err.domain(), Some(crate::Error::DuplicateVote { .. })));
    }

    assert_eq!(store.count_upvotes(q.question_id).await.unwrap(), 1);
    assert_eq!(store.count_downvotes(q.question_id).await.unwrap(), 0);
  }

  #[tokio::test]
  async fn validation_happens_before_the_store() {
    let store = MemoryStore::default();
    let svc = QuestionService::new(&store);

    let err = svc.create_event(&ctx(), "  ".into()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(crate::Error::Validation { .. })));
    assert!(store.list_events().await.unwrap().is_empty());
  }
}
