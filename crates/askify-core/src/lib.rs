//! Core types and trait definitions for Askify.
//!
//! Holds the domain model (events, questions, votes), the scoring and
//! ranking engine, and the [`store::AskifyStore`] abstraction. Free of HTTP
//! and database dependencies.

pub mod context;
pub mod error;
pub mod event;
pub mod question;
pub mod score;
pub mod service;
pub mod store;
pub mod vote;

pub use error::{Error, Result};
