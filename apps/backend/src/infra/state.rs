use std::sync::Arc;

use crate::config::app::{AppConfig, TriviaMode};
use crate::config::db::{DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::trivia::openai::OpenAiTriviaGenerator;
use crate::trivia::stub::StubTriviaGenerator;
use crate::trivia::TriviaGenerator;

/// Builder for AppState instances, used by both main and tests.
pub struct StateBuilder {
    config: AppConfig,
    db_profile: Option<DbProfile>,
    trivia: Option<Arc<dyn TriviaGenerator>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            db_profile: None,
            trivia: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_trivia(mut self, trivia: Arc<dyn TriviaGenerator>) -> Self {
        self.trivia = Some(trivia);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let trivia: Arc<dyn TriviaGenerator> = match self.trivia {
            Some(trivia) => trivia,
            None => match self.config.trivia_mode {
                TriviaMode::Stub => Arc::new(StubTriviaGenerator),
                TriviaMode::OpenAi => {
                    let api_key = self.config.openai_api_key.clone().ok_or_else(|| {
                        AppError::config("openai trivia mode requires OPENAI_API_KEY")
                    })?;
                    Arc::new(OpenAiTriviaGenerator::new(
                        api_key,
                        self.config.openai_model.clone(),
                    ))
                }
            },
        };

        if let Some(profile) = self.db_profile {
            // Single entrypoint: connect + migrate.
            let conn = bootstrap_db(profile, DbOwner::App).await?;
            Ok(AppState::new(conn, self.config, trivia))
        } else {
            Ok(AppState::without_db(self.config, trivia))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
