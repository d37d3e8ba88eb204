use crate::error::{Error, Result};
use crate::models::code_evaluation::{TestCase, TestCaseResult};
use crate::models::judge::{JudgeStatus, Submission, SubmissionResult, SubmissionToken};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_JUDGE_URL: &str = "https://judge0-ce.p.rapidapi.com";

/// Remote code-execution service.
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    async fn create_submission(&self, submission: &Submission) -> Result<String>;
    async fn get_submission(&self, token: &str) -> Result<SubmissionResult>;
}

#[derive(Clone)]
pub struct Judge0Client {
    client: Client,
    base_url: String,
    api_key: String,
    api_host: String,
}

impl Judge0Client {
    pub fn new(base_url: String, api_key: String, client: Client) -> Result<Self> {
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("Invalid JUDGE0_URL {}: {}", base_url, e)))?;
        let api_host = parsed
            .host_str()
            .ok_or_else(|| Error::Config(format!("JUDGE0_URL has no host: {}", base_url)))?
            .to_string();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_host,
        })
    }

    fn with_headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
    }
}

#[async_trait]
impl JudgeBackend for Judge0Client {
    async fn create_submission(&self, submission: &Submission) -> Result<String> {
        let res = self
            .with_headers(self.client.post(format!(
                "{}/submissions?base64_encoded=false&wait=false",
                self.base_url
            )))
            .json(submission)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            tracing::error!(%status, body = %text, "Judge0 submission error");
            return Err(Error::Judge(format!("Failed to create submission: {}", status)));
        }

        let body: SubmissionToken = res.json().await?;
        Ok(body.token)
    }

    async fn get_submission(&self, token: &str) -> Result<SubmissionResult> {
        let res = self
            .with_headers(self.client.get(format!(
                "{}/submissions/{}?base64_encoded=false",
                self.base_url, token
            )))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            tracing::error!(%status, token, "Judge0 fetch error");
            return Err(Error::Judge(format!(
                "Failed to fetch submission result: {}",
                status
            )));
        }

        Ok(res.json().await?)
    }
}

/// Submits programs and polls the judge until a verdict is reached.
#[derive(Clone)]
pub struct CodeJudgeClient {
    backend: Arc<dyn JudgeBackend>,
    max_polls: u32,
    poll_interval: Duration,
}

impl CodeJudgeClient {
    pub fn new(backend: Arc<dyn JudgeBackend>) -> Self {
        Self {
            backend,
            max_polls: 10,
            poll_interval: Duration::from_millis(1000),
        }
    }

    /// `max_polls` is at least one.
    pub fn with_polling(mut self, max_polls: u32, poll_interval: Duration) -> Self {
        self.max_polls = max_polls.max(1);
        self.poll_interval = poll_interval;
        self
    }

    pub async fn submit_and_wait(&self, submission: &Submission) -> Result<SubmissionResult> {
        let token = self.backend.create_submission(submission).await?;
        tracing::debug!(token = %token, language_id = submission.language_id, "Submission created");

        for attempt in 0..self.max_polls {
            let result = self.backend.get_submission(&token).await?;
            if !result.status.status().is_pending() {
                return Ok(result);
            }
            if attempt + 1 < self.max_polls {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        tracing::warn!(token = %token, polls = self.max_polls, "Submission never left the queue");
        Err(Error::JudgeTimeout(self.max_polls))
    }
}

pub fn language_id(language: &str) -> Option<u32> {
    let id = match language.to_lowercase().as_str() {
        "javascript" | "js" => 63,
        "typescript" | "ts" => 74,
        "python" | "py" => 71,
        "java" => 62,
        "c++" | "cpp" => 54,
        "c" => 50,
        "csharp" => 51,
        "go" => 60,
        "rust" => 73,
        "ruby" => 72,
        _ => return None,
    };
    Some(id)
}

fn trimmed(output: &Option<String>) -> Option<String> {
    output.as_ref().map(|s| s.trim().to_string())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Maps a terminal judge verdict onto a test case outcome.
pub fn outcome(result: &SubmissionResult, test_case: &TestCase) -> TestCaseResult {
    let base = TestCaseResult {
        input: test_case.input.clone(),
        expected_output: test_case.expected_output.clone(),
        ..Default::default()
    };
    let time = result.time.unwrap_or(0.0);
    let memory = result.memory.unwrap_or(0.0);

    match result.status.status() {
        JudgeStatus::Accepted => TestCaseResult {
            passed: true,
            actual_output: trimmed(&result.stdout),
            execution_time: time,
            memory_usage: memory,
            ..base
        },
        JudgeStatus::WrongAnswer | JudgeStatus::TimeLimitExceeded => TestCaseResult {
            passed: false,
            actual_output: trimmed(&result.stdout),
            error: result.status.description.clone(),
            execution_time: time,
            memory_usage: memory,
            ..base
        },
        JudgeStatus::CompilationError => TestCaseResult {
            passed: false,
            error: Some(
                non_empty(&result.compile_output)
                    .unwrap_or_else(|| "Compilation error".to_string()),
            ),
            execution_time: 0.0,
            memory_usage: 0.0,
            ..base
        },
        _ => TestCaseResult {
            passed: false,
            actual_output: trimmed(&result.stdout),
            error: Some(
                non_empty(&result.message)
                    .or_else(|| non_empty(&result.stderr))
                    .or_else(|| non_empty(&result.status.description))
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
            execution_time: time,
            memory_usage: memory,
            ..base
        },
    }
}
