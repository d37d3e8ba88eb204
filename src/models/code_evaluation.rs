use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeEvaluationRequest {
    pub code: String,
    pub language: String,
    pub function_name: Option<String>,
    pub test_cases: Vec<TestCase>,
    /// CPU seconds per test case.
    #[serde(default = "default_time_limit")]
    pub time_limit: f64,
    /// Megabytes per test case.
    #[serde(default = "default_memory_limit")]
    pub memory_limit: u64,
}

pub fn default_time_limit() -> f64 {
    5.0
}

pub fn default_memory_limit() -> u64 {
    128
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub input: String,
    pub expected_output: String,
    pub passed: bool,
    pub actual_output: Option<String>,
    pub error: Option<String>,
    /// Seconds.
    pub execution_time: f64,
    /// Kilobytes.
    pub memory_usage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub total_time: f64,
    pub total_memory: f64,
    pub average_time: f64,
    pub average_memory: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeEvaluationReport {
    pub total_test_cases: usize,
    pub passed_test_cases: usize,
    pub results: Vec<TestCaseResult>,
    /// Percentage of passed test cases, 0-100.
    pub overall_score: f64,
    pub feedback: String,
    pub execution_summary: ExecutionSummary,
}
