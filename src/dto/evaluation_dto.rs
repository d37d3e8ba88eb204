use crate::models::code_evaluation::{CodeEvaluationReport, TestCase, TestCaseResult};
use crate::models::interview::SessionQuestion;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EvaluateAnswerPayload {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
    #[serde(default)]
    pub expected_points: Vec<String>,
    #[validate(length(min = 1))]
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EvaluateCodePayload {
    #[validate(length(min = 1))]
    pub code: String,
    pub language: Option<String>,
    pub function_name: Option<String>,
    #[validate(length(min = 1))]
    pub test_cases: Vec<TestCase>,
    /// Seconds. Stock Judge0 caps CPU time at 15.
    #[validate(range(min = 0.1, max = 15.0))]
    pub time_limit: Option<f64>,
    /// Megabytes. Stock Judge0 caps memory at 512000 KB.
    #[validate(range(min = 16, max = 500))]
    pub memory_limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateCodeResponse {
    pub success: bool,
    pub evaluation: CodeEvaluationReport,
    pub evaluation_id: uuid::Uuid,
    pub evaluated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewSolutionPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[validate(length(min = 1))]
    pub code: String,
    #[serde(default)]
    pub results: Vec<TestCaseResult>,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSolutionResponse {
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteSessionPayload {
    pub questions: Vec<SessionQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateTestCasesPayload {
    #[validate(length(min = 1))]
    pub problem_type: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// Extra randomly generated cases on top of the canned ones.
    #[serde(default)]
    #[validate(range(max = 20))]
    pub random_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(time_limit: Option<f64>, memory_limit: Option<u64>) -> EvaluateCodePayload {
        EvaluateCodePayload {
            code: "function add(a, b) { return a + b; }".into(),
            language: None,
            function_name: None,
            test_cases: vec![TestCase {
                input: "1, 2".into(),
                expected_output: "3".into(),
            }],
            time_limit,
            memory_limit,
        }
    }

    #[test]
    fn limits_stay_within_judge_caps() {
        assert!(payload(None, None).validate().is_ok());
        assert!(payload(Some(15.0), Some(500)).validate().is_ok());

        let errors = payload(Some(20.0), None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("time_limit"));

        // 512 MB is 524288 KB, above the judge's 512000 KB ceiling.
        let errors = payload(None, Some(512)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("memory_limit"));
    }
}
