//! Question scoring and ranking.
//!
//! A question's score is a lower confidence bound on its approval rate:
//! the smoothed share of upvotes minus a spread term that shrinks as the
//! number of votes grows. A handful of unanimous votes therefore ranks below
//! a large, consistent tally.
//!
//! Everything here is pure and safe to call from any thread.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::question::Question;

/// z-value of the one-sided bound.
const Z: f64 = 1.65;

/// Score a tally of `upvotes` and `downvotes`.
///
/// With `a = upvotes + 1` and `b = downvotes + 1`:
///
/// ```text
/// score = a / (a + b) - Z * sqrt(a * b / ((a + b)^(a + b) * (a + b + 1)))
/// ```
///
/// The spread is evaluated in log space, so large tallies cannot overflow;
/// as the total grows the spread decays to zero and the score approaches
/// the smoothed mean.
pub fn score(upvotes: u64, downvotes: u64) -> f64 {
  let a = upvotes as f64 + 1.0;
  let b = downvotes as f64 + 1.0;
  let n = a + b;

  let mean = a / n;
  let ln_spread_sq =
    2.0 * Z.ln() + a.ln() + b.ln() - n * n.ln() - (n + 1.0).ln();
  let spread = (ln_spread_sq / 2.0).exp();

  mean - spread
}

/// A question paired with the score it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredQuestion {
  #[serde(flatten)]
  pub question: Question,
  pub score:    f64,
}

/// Order `questions` best first.
///
/// Equal scores fall back to `question_id` ascending so the order is total.
/// The input is left untouched.
pub fn rank(questions: &[Question]) -> Vec<Question> {
  rank_scored(questions)
    .into_iter()
    .map(|sq| sq.question)
    .collect()
}

/// Like [`rank`], keeping each question's score alongside it.
pub fn rank_scored(questions: &[Question]) -> Vec<ScoredQuestion> {
  let mut scored: Vec<ScoredQuestion> = questions
    .iter()
    .map(|q| ScoredQuestion { score: q.score(), question: q.clone() })
    .collect();
  scored.sort_by(by_rank);
  scored
}

fn by_rank(left: &ScoredQuestion, right: &ScoredQuestion) -> Ordering {
  right
    .score
    .total_cmp(&left.score)
    .then_with(|| left.question.question_id.cmp(&right.question.question_id))
}
