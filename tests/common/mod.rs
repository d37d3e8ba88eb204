#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use prep_evaluator::config::Config;
use prep_evaluator::error::Result;
use prep_evaluator::models::judge::{StatusInfo, Submission, SubmissionResult};
use prep_evaluator::services::judge_service::JudgeBackend;
use prep_evaluator::services::llm_service::{ChatCompletion, ChatRequest};

mock! {
    pub Llm {}

    #[async_trait]
    impl ChatCompletion for Llm {
        async fn complete(&self, request: ChatRequest) -> Result<String>;
    }
}

mock! {
    pub Judge {}

    #[async_trait]
    impl JudgeBackend for Judge {
        async fn create_submission(&self, submission: &Submission) -> Result<String>;
        async fn get_submission(&self, token: &str) -> Result<SubmissionResult>;
    }
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        openai_api_key: "sk-test".into(),
        openai_base_url: "http://localhost/v1".into(),
        openai_model: "gpt-3.5-turbo".into(),
        llm_min_interval_ms: 0,
        judge0_url: "http://localhost:2358".into(),
        judge0_api_key: String::new(),
        judge_max_polls: 3,
        judge_poll_interval_ms: 1,
        eval_cache_ttl_secs: 3600,
        eval_cache_sweep_secs: 600,
    }
}

pub fn verdict(id: u32, description: &str, stdout: Option<&str>) -> SubmissionResult {
    SubmissionResult {
        status: StatusInfo {
            id,
            description: Some(description.to_string()),
        },
        stdout: stdout.map(str::to_string),
        stderr: None,
        compile_output: None,
        message: None,
        time: Some(0.01),
        memory: Some(2048.0),
    }
}
