//! OpenAI-backed generator using the Responses API with a strict JSON
//! schema. Retries malformed or off-spec completions up to three times
//! before surfacing an unavailable error.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use super::{GeneratedQuestion, TriviaError, TriviaGenerator};
use crate::entities::cell_states::Topic;

const RESPONSES_URL: &str = "https://api.openai.com/v1/responses";
const MAX_ATTEMPTS: u32 = 3;
const MAX_QUESTION_LEN: usize = 500;

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    question_text: String,
    answer: String,
    acceptable_variants: Vec<String>,
}

pub struct OpenAiTriviaGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiTriviaGenerator {
    pub fn new(api_key: String, model: String) -> OpenAiTriviaGenerator {
        OpenAiTriviaGenerator {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    fn request_body(
        &self,
        topic: Topic,
        required_letter: char,
        prior_questions: &[String],
    ) -> Value {
        let developer_prompt = [
            "You generate one trivia question as strict JSON only.",
            "Rules:",
            "- Keep it common-knowledge and unambiguous.",
            "- The correct answer must start with the required letter.",
            "- Include acceptable_variants for strict exact matching.",
            "- Do not add any keys beyond question_text, answer, acceptable_variants.",
            "- Keep question_text concise.",
        ]
        .join("\n");

        let prior_lines = if prior_questions.is_empty() {
            "- (none)".to_string()
        } else {
            prior_questions
                .iter()
                .map(|q| format!("- {q}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let user_prompt = format!(
            "Topic: {}\nRequired starting letter for answer: {required_letter}\nPrior question_text values for this session/player/cell (avoid repetition):\n{prior_lines}\nReturn JSON only.",
            topic.as_str()
        );

        json!({
            "model": self.model,
            "input": [
                {"role": "developer", "content": developer_prompt},
                {"role": "user", "content": user_prompt},
            ],
            "text": {
                "format": {
                    "type": "json_schema",
                    "name": "trivia_question",
                    "strict": true,
                    "schema": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["question_text", "answer", "acceptable_variants"],
                        "properties": {
                            "question_text": {"type": "string"},
                            "answer": {"type": "string"},
                            "acceptable_variants": {
                                "type": "array",
                                "minItems": 1,
                                "items": {"type": "string"},
                            },
                        },
                    },
                }
            },
        })
    }
}

/// Pull the structured JSON out of a Responses API reply, which may carry
/// it as `output_text` or nested under `output[].content[]`.
fn extract_structured_payload(response: &Value) -> Result<QuestionPayload, String> {
    if let Some(text) = response.get("output_text").and_then(Value::as_str) {
        if !text.trim().is_empty() {
            return serde_json::from_str(text).map_err(|e| format!("output_text parse: {e}"));
        }
    }

    if let Some(items) = response.get("output").and_then(Value::as_array) {
        for item in items {
            let Some(contents) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for content in contents {
                if let Some(parsed) = content.get("json") {
                    if parsed.is_object() {
                        return serde_json::from_value(parsed.clone())
                            .map_err(|e| format!("content json parse: {e}"));
                    }
                }
                if let Some(text) = content.get("text").and_then(Value::as_str) {
                    if !text.trim().is_empty() {
                        return serde_json::from_str(text)
                            .map_err(|e| format!("content text parse: {e}"));
                    }
                }
            }
        }
    }

    Err("response did not contain parseable structured JSON".to_string())
}

/// Reject completions that parse but break the contract the engine
/// relies on.
fn semantic_guard(payload: &QuestionPayload, required_letter: char) -> Result<(), String> {
    if payload.question_text.len() > MAX_QUESTION_LEN {
        return Err("question_too_long".to_string());
    }
    if payload.acceptable_variants.is_empty() {
        return Err("acceptable_variants_empty".to_string());
    }
    if payload.acceptable_variants.iter().any(|v| v.trim().is_empty()) {
        return Err("acceptable_variant_empty_after_trim".to_string());
    }
    let answer = payload.answer.trim();
    if answer.is_empty() {
        return Err("answer_empty_after_trim".to_string());
    }
    let starts_with_required = answer
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&required_letter));
    if !starts_with_required {
        return Err("answer_does_not_start_with_required_letter".to_string());
    }
    Ok(())
}

#[async_trait]
impl TriviaGenerator for OpenAiTriviaGenerator {
    fn name(&self) -> &'static str {
        "openai_responses_v1"
    }

    async fn generate(
        &self,
        topic: Topic,
        required_letter: char,
        _cell_index: usize,
        prior_questions: &[String],
    ) -> Result<GeneratedQuestion, TriviaError> {
        let body = self.request_body(topic, required_letter, prior_questions);

        for attempt in 1..=MAX_ATTEMPTS {
            let response = match self
                .client
                .post(RESPONSES_URL)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!(attempt, error = %e, "openai request failed");
                    continue;
                }
            };

            if !response.status().is_success() {
                warn!(attempt, status = %response.status(), "openai returned an error status");
                continue;
            }

            let value: Value = match response.json().await {
                Ok(value) => value,
                Err(e) => {
                    warn!(attempt, error = %e, "openai response body was not json");
                    continue;
                }
            };

            let payload = match extract_structured_payload(&value) {
                Ok(payload) => payload,
                Err(reason) => {
                    warn!(attempt, reason, "openai structured output parse failed");
                    continue;
                }
            };

            if let Err(reason) = semantic_guard(&payload, required_letter) {
                warn!(attempt, reason, "openai completion failed semantic guard");
                continue;
            }

            return Ok(GeneratedQuestion {
                question_text: payload.question_text,
                answer: payload.answer,
                acceptable_variants: payload.acceptable_variants,
            });
        }

        Err(TriviaError::Unavailable(
            "OpenAI generation attempts exhausted".to_string(),
        ))
    }
}
