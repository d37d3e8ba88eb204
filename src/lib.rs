pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{
    answer_evaluator::AnswerEvaluator,
    code_evaluator::CodeEvaluator,
    eval_cache::ResultCache,
    judge_service::{CodeJudgeClient, Judge0Client, JudgeBackend},
    llm_service::{ChatCompletion, OpenAiClient},
};
use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub answer_evaluator: AnswerEvaluator,
    pub code_evaluator: CodeEvaluator,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let llm = OpenAiClient::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            http_client.clone(),
        )
        .with_min_interval(Duration::from_millis(config.llm_min_interval_ms));
        let judge = Judge0Client::new(
            config.judge0_url.clone(),
            config.judge0_api_key.clone(),
            http_client,
        )?;

        Ok(Self::from_parts(
            Arc::new(llm),
            Arc::new(judge),
            config,
        ))
    }

    /// Wires the evaluators around arbitrary grader and judge backends.
    pub fn from_parts(
        llm: Arc<dyn ChatCompletion>,
        judge: Arc<dyn JudgeBackend>,
        config: &Config,
    ) -> Self {
        let cache = ResultCache::new(Duration::from_secs(config.eval_cache_ttl_secs));
        let answer_evaluator = AnswerEvaluator::new(llm, cache, config.openai_model.clone());
        let judge_client = CodeJudgeClient::new(judge).with_polling(
            config.judge_max_polls,
            Duration::from_millis(config.judge_poll_interval_ms),
        );
        let code_evaluator = CodeEvaluator::new(judge_client);

        Self {
            answer_evaluator,
            code_evaluator,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/interview/evaluate",
            post(routes::evaluation::evaluate_answer),
        )
        .route(
            "/api/interview/complete",
            post(routes::evaluation::complete_session),
        )
        .route("/api/dsa/evaluate", post(routes::evaluation::evaluate_code))
        .route("/api/dsa/review", post(routes::evaluation::review_solution))
        .route(
            "/api/dsa/test-cases",
            post(routes::evaluation::generate_cases),
        )
        .with_state(state)
}
