//! Trivia question generation behind a trait so the engine never cares
//! which backend produced a question.

pub mod openai;
pub mod stub;

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::cell_states::Topic;
use crate::errors::domain::DomainError;

/// A generated question plus its answer-matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuestion {
    pub question_text: String,
    pub answer: String,
    /// Additional accepted answers; matching is case-insensitive and
    /// whitespace-trimmed against answer and every variant.
    pub acceptable_variants: Vec<String>,
}

#[derive(Debug, Error)]
pub enum TriviaError {
    /// The backend is down or exhausted its retry budget; the ask can be
    /// retried as a whole since nothing was persisted.
    #[error("trivia generation unavailable: {0}")]
    Unavailable(String),
    #[error("invalid generation input: {0}")]
    InvalidInput(String),
}

impl From<TriviaError> for DomainError {
    fn from(err: TriviaError) -> Self {
        match err {
            TriviaError::Unavailable(detail) => DomainError::unavailable(detail),
            TriviaError::InvalidInput(detail) => DomainError::validation(detail),
        }
    }
}

#[async_trait]
pub trait TriviaGenerator: Send + Sync {
    /// Short identifier recorded in the question_asked event payload.
    fn name(&self) -> &'static str;

    /// Produce a question whose answer starts with `required_letter`.
    /// `prior_questions` holds earlier question texts for the same cell
    /// so generators can avoid repetition.
    async fn generate(
        &self,
        topic: Topic,
        required_letter: char,
        cell_index: usize,
        prior_questions: &[String],
    ) -> Result<GeneratedQuestion, TriviaError>;
}
