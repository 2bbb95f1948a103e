//! Deterministic offline generator: one fixed answer per letter, two
//! question templates per topic selected by cell index.

use async_trait::async_trait;

use super::{GeneratedQuestion, TriviaError, TriviaGenerator};
use crate::entities::cell_states::Topic;

pub const STUB_ANSWERS_BY_LETTER: [&str; 26] = [
    "ATHENS", "BERLIN", "CARBON", "DELHI", "EDISON", "FALCON", "GALILEO", "HAMILTON", "INDIA",
    "JUPITER", "KENYA", "LONDON", "MERCURY", "NEPTUNE", "OXYGEN", "PYRAMID", "QUEBEC", "ROME",
    "SATURN", "TOKYO", "URANIUM", "VENUS", "WARSAW", "XENON", "YUKON", "ZURICH",
];

fn templates(topic: Topic) -> [&'static str; 2] {
    match topic {
        Topic::Politics => [
            "Name a government-related term that starts with",
            "Name a notable public figure whose name starts with",
        ],
        Topic::Science => [
            "Name a famous element that starts with",
            "Name a science term that starts with",
        ],
        Topic::History => [
            "Name a historical reference that starts with",
            "Name a famous event or era that starts with",
        ],
        Topic::Art => [
            "Name an art-related term that starts with",
            "Name a famous work or artist that starts with",
        ],
        Topic::CurrentAffairs => [
            "Name a current-events topic that starts with",
            "Name a recent headline concept that starts with",
        ],
    }
}

pub struct StubTriviaGenerator;

#[async_trait]
impl TriviaGenerator for StubTriviaGenerator {
    fn name(&self) -> &'static str {
        "stub_v1"
    }

    async fn generate(
        &self,
        topic: Topic,
        required_letter: char,
        cell_index: usize,
        _prior_questions: &[String],
    ) -> Result<GeneratedQuestion, TriviaError> {
        let letter = required_letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(TriviaError::InvalidInput(format!(
                "required letter must be A-Z, got {required_letter:?}"
            )));
        }

        let answer = STUB_ANSWERS_BY_LETTER[(letter as u8 - b'A') as usize].to_string();
        let template = templates(topic)[cell_index % 2];
        Ok(GeneratedQuestion {
            question_text: format!("{} (Stub): {template} {letter}.", topic.as_str()),
            answer: answer.clone(),
            acceptable_variants: vec![answer],
        })
    }
}
