use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::app::AppConfig;
use crate::infra::rate_limit::AskRateLimiter;
use crate::trivia::TriviaGenerator;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for handler tests without a store).
    pub db: Option<DatabaseConnection>,
    pub config: AppConfig,
    pub trivia: Arc<dyn TriviaGenerator>,
    pub ask_limiter: Arc<AskRateLimiter>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        config: AppConfig,
        trivia: Arc<dyn TriviaGenerator>,
    ) -> Self {
        let ask_limiter = Arc::new(AskRateLimiter::new(
            config.ask_rate_limit_requests,
            config.ask_rate_limit_window_seconds,
        ));
        Self {
            db: Some(db),
            config,
            trivia,
            ask_limiter,
        }
    }

    pub fn without_db(config: AppConfig, trivia: Arc<dyn TriviaGenerator>) -> Self {
        let ask_limiter = Arc::new(AskRateLimiter::new(
            config.ask_rate_limit_requests,
            config.ask_rate_limit_window_seconds,
        ));
        Self {
            db: None,
            config,
            trivia,
            ask_limiter,
        }
    }

    #[cfg(test)]
    pub fn for_tests(db: DatabaseConnection) -> Self {
        Self::new(
            db,
            AppConfig::default(),
            Arc::new(crate::trivia::stub::StubTriviaGenerator),
        )
    }

    #[cfg(test)]
    pub fn for_tests_without_db() -> Self {
        Self::without_db(
            AppConfig::default(),
            Arc::new(crate::trivia::stub::StubTriviaGenerator),
        )
    }
}
