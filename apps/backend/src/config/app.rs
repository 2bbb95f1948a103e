use std::env;

use crate::error::AppError;

/// Which trivia generator backs the ask endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaMode {
    Stub,
    OpenAi,
}

/// Process configuration read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub trivia_mode: TriviaMode,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// Ask requests allowed per (session, client) within the window.
    pub ask_rate_limit_requests: u32,
    pub ask_rate_limit_window_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, AppError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("PORT must be a number, got '{raw}'")))?,
            Err(_) => 8080,
        };

        let trivia_mode = match env::var("TRIVIA_GENERATOR").as_deref() {
            Ok("openai") => TriviaMode::OpenAi,
            Ok("stub") | Err(_) => TriviaMode::Stub,
            Ok(other) => {
                return Err(AppError::config(format!(
                    "TRIVIA_GENERATOR must be 'stub' or 'openai', got '{other}'"
                )))
            }
        };
        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        if trivia_mode == TriviaMode::OpenAi && openai_api_key.is_none() {
            return Err(AppError::config(
                "TRIVIA_GENERATOR=openai requires OPENAI_API_KEY",
            ));
        }
        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-5-mini".to_string());

        let ask_rate_limit_requests = parse_var("ASK_RATE_LIMIT_REQUESTS", 10u32)?;
        let ask_rate_limit_window_seconds = parse_var("ASK_RATE_LIMIT_WINDOW_SECONDS", 60u64)?;

        Ok(AppConfig {
            host,
            port,
            trivia_mode,
            openai_api_key,
            openai_model,
            ask_rate_limit_requests,
            ask_rate_limit_window_seconds,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            trivia_mode: TriviaMode::Stub,
            openai_api_key: None,
            openai_model: "gpt-5-mini".to_string(),
            ask_rate_limit_requests: 10,
            ask_rate_limit_window_seconds: 60,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} must be a number, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}
