use crate::error::{Error, Result};
use crate::models::code_evaluation::{
    CodeEvaluationReport, CodeEvaluationRequest, ExecutionSummary, TestCase, TestCaseResult,
};
use crate::models::judge::Submission;
use crate::services::judge_service::{language_id, outcome, CodeJudgeClient};
use crate::utils::code_sanitizer::{extract_function_name, sanitize_code, validate_code_structure};

#[derive(Clone)]
pub struct CodeEvaluator {
    judge: CodeJudgeClient,
}

impl CodeEvaluator {
    pub fn new(judge: CodeJudgeClient) -> Self {
        Self { judge }
    }

    /// Runs every test case through the judge, one after another, and
    /// aggregates the verdicts. A failure on one case is recorded against
    /// that case only.
    pub async fn evaluate_code(&self, request: &CodeEvaluationRequest) -> Result<CodeEvaluationReport> {
        if request.test_cases.is_empty() {
            return Err(Error::BadRequest(
                "No test cases available for this problem".to_string(),
            ));
        }
        let language_id = language_id(&request.language).ok_or_else(|| {
            Error::BadRequest(format!("Unsupported language: {}", request.language))
        })?;
        validate_code_structure(&request.code)?;

        let sanitized = sanitize_code(&request.code, &request.language);
        let function_name = extract_function_name(&request.code, request.function_name.as_deref())
            .ok_or_else(|| Error::BadRequest("Function name not found in code".to_string()))?;

        let mut results = Vec::with_capacity(request.test_cases.len());
        for test_case in &request.test_cases {
            let source_code =
                prepare_executable_code(&sanitized, &function_name, &test_case.input, &request.language);
            let submission = Submission {
                source_code,
                language_id,
                stdin: test_case.input.clone(),
                expected_output: Some(test_case.expected_output.clone()),
                cpu_time_limit: request.time_limit,
                memory_limit: request.memory_limit * 1024,
            };

            let result = match self.judge.submit_and_wait(&submission).await {
                Ok(verdict) => outcome(&verdict, test_case),
                Err(e) => {
                    tracing::warn!(error = %e, input = %test_case.input, "Test case evaluation failed");
                    failed_case(test_case, &e)
                }
            };
            results.push(result);
        }

        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let overall_score = passed as f64 / total as f64 * 100.0;
        tracing::info!(passed, total, language = %request.language, "Code evaluation finished");

        Ok(CodeEvaluationReport {
            total_test_cases: total,
            passed_test_cases: passed,
            feedback: generate_feedback(overall_score, &results),
            execution_summary: execution_summary(&results),
            overall_score,
            results,
        })
    }
}

fn failed_case(test_case: &TestCase, err: &Error) -> TestCaseResult {
    TestCaseResult {
        input: test_case.input.clone(),
        expected_output: test_case.expected_output.clone(),
        passed: false,
        error: Some(format!("Test case evaluation failed: {}", err)),
        ..Default::default()
    }
}

/// JavaScript and TypeScript submissions get a harness that calls the entry
/// function with the test input and prints the JSON-encoded result. Other
/// languages are expected to read stdin themselves.
pub fn prepare_executable_code(code: &str, function_name: &str, input: &str, language: &str) -> String {
    let lang = language.to_lowercase();
    if matches!(lang.as_str(), "javascript" | "js" | "typescript" | "ts") {
        return format!(
            r#"{code}

// Test execution
try {{
  const result = {function_name}({input});
  console.log(JSON.stringify(result));
}} catch (err) {{
  console.error("Runtime Error:", err.message);
}}"#
        );
    }
    code.to_string()
}

pub fn generate_feedback(score: f64, results: &[TestCaseResult]) -> String {
    if score >= 100.0 {
        "Excellent! All test cases passed. Your solution is correct and efficient.".to_string()
    } else if score >= 80.0 {
        "Good job! Most test cases passed. Review the failed cases for edge scenarios.".to_string()
    } else if score >= 50.0 {
        let issues: Vec<&str> = results
            .iter()
            .filter(|r| !r.passed)
            .filter_map(|r| r.error.as_deref())
            .collect();
        format!(
            "Partial success. Focus on understanding the algorithm better. Issues: {}",
            issues.join(", ")
        )
    } else {
        "Needs improvement. Review the fundamental concepts and try again.".to_string()
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Totals and averages over cases that reported both time and memory.
pub fn execution_summary(results: &[TestCaseResult]) -> ExecutionSummary {
    let measured: Vec<&TestCaseResult> = results
        .iter()
        .filter(|r| r.execution_time > 0.0 && r.memory_usage > 0.0)
        .collect();
    if measured.is_empty() {
        return ExecutionSummary::default();
    }

    let count = measured.len() as f64;
    let total_time: f64 = measured.iter().map(|r| r.execution_time).sum();
    let total_memory: f64 = measured.iter().map(|r| r.memory_usage).sum();

    ExecutionSummary {
        total_time: round_to(total_time, 3),
        total_memory: round_to(total_memory, 2),
        average_time: round_to(total_time / count, 3),
        average_memory: round_to(total_memory / count, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(time: f64, memory: f64, passed: bool) -> TestCaseResult {
        TestCaseResult {
            passed,
            execution_time: time,
            memory_usage: memory,
            ..Default::default()
        }
    }

    #[test]
    fn harness_wraps_javascript_only() {
        let js = prepare_executable_code("function add(a, b) { return a + b; }", "add", "1, 2", "JavaScript");
        assert!(js.contains("const result = add(1, 2);"));
        assert!(js.contains("console.log(JSON.stringify(result));"));

        let py = prepare_executable_code("print(1)", "solve", "1, 2", "python");
        assert_eq!(py, "print(1)");
    }

    #[test]
    fn feedback_tiers() {
        assert!(generate_feedback(100.0, &[]).starts_with("Excellent!"));
        assert!(generate_feedback(80.0, &[]).starts_with("Good job!"));
        let results = vec![
            TestCaseResult {
                passed: true,
                ..Default::default()
            },
            TestCaseResult {
                passed: false,
                error: Some("Wrong Answer".into()),
                ..Default::default()
            },
        ];
        assert_eq!(
            generate_feedback(50.0, &results),
            "Partial success. Focus on understanding the algorithm better. Issues: Wrong Answer"
        );
        assert!(generate_feedback(49.9, &results).starts_with("Needs improvement."));
    }

    #[test]
    fn summary_skips_unmeasured_cases() {
        let results = vec![
            measured(0.0121, 3000.0, true),
            measured(0.0207, 3100.557, false),
            measured(0.0, 0.0, false),
            measured(0.5, 0.0, false),
        ];
        let summary = execution_summary(&results);
        assert_eq!(summary.total_time, 0.033);
        assert_eq!(summary.total_memory, 6100.56);
        assert_eq!(summary.average_time, 0.016);
        assert_eq!(summary.average_memory, 3050.28);
    }

    #[test]
    fn summary_is_zero_without_measurements() {
        assert_eq!(
            execution_summary(&[measured(0.0, 0.0, false)]),
            ExecutionSummary::default()
        );
    }
}
