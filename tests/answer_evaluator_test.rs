mod common;

use std::sync::Arc;

use common::{test_config, MockJudge, MockLlm};
use prep_evaluator::error::Error;
use prep_evaluator::models::answer_evaluation::{AnswerEvaluationRequest, EvaluationMethod};
use prep_evaluator::models::code_evaluation::TestCaseResult;
use prep_evaluator::utils::prompts::ProblemBrief;
use prep_evaluator::AppState;

fn closure_request(answer: &str) -> AnswerEvaluationRequest {
    AnswerEvaluationRequest {
        question: "What is a closure in JavaScript?".into(),
        user_answer: answer.into(),
        expected_points: vec![
            "function bundled with lexical environment".into(),
            "captures outer variables".into(),
        ],
        topic: "javascript".into(),
    }
}

fn state_with(llm: MockLlm) -> AppState {
    AppState::from_parts(Arc::new(llm), Arc::new(MockJudge::new()), &test_config())
}

#[tokio::test]
async fn llm_score_is_reconciled_and_cached() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .times(1)
        .withf(|req| {
            req.model == "gpt-3.5-turbo"
                && req.max_tokens == 500
                && req.messages.len() == 1
                && req.messages[0].content.contains("What is a closure in JavaScript?")
        })
        .returning(|_| {
            Ok(r#"{"score": 8, "feedback": "Solid answer", "missedPoints": ["lexical environment"],
                  "suggestions": ["Show an example"], "confidence": 0.9}"#
                .to_string())
        });
    let state = state_with(llm);

    // Every relevant word of both points appears in the answer: keyword = 1.0.
    let answer = "A closure is a function bundled with its lexical environment; it captures outer variables.";
    let first = state.answer_evaluator.evaluate_answer(&closure_request(answer)).await;
    // round(8 * 0.7 + 1.0 * 10 * 0.3) = round(8.6) = 9
    assert_eq!(first.score, 9.0);
    assert_eq!(first.feedback, "Solid answer");
    assert_eq!(first.missed_points, vec!["lexical environment".to_string()]);
    assert_eq!(first.confidence, 0.9);
    assert_eq!(first.method, EvaluationMethod::Llm);

    let second = state.answer_evaluator.evaluate_answer(&closure_request(answer)).await;
    assert_eq!(first, second);
    assert_eq!(state.answer_evaluator.cache().len(), 1);
}

#[tokio::test]
async fn grader_outage_falls_back_without_caching() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .times(2)
        .returning(|_| Err(Error::Llm("OpenAI API Error 503".into())));
    let state = state_with(llm);

    let request = closure_request("A closure captures outer variables.");
    let result = state.answer_evaluator.evaluate_answer(&request).await;

    // First point: 0 of 5 relevant words; second point: 3 of 3.
    assert!((result.score - 5.0).abs() < 1e-9, "got {}", result.score);
    assert_eq!(result.method, EvaluationMethod::KeywordFallback);
    assert_eq!(result.confidence, 0.6);
    assert_eq!(
        result.feedback,
        "Evaluated using keyword matching (LLM unavailable)"
    );
    assert_eq!(
        result.missed_points,
        vec!["function bundled with lexical environment".to_string()]
    );
    assert!(state.answer_evaluator.cache().is_empty());

    // Not cached, so the grader is asked again.
    state.answer_evaluator.evaluate_answer(&request).await;
}

#[tokio::test]
async fn unparsable_grader_reply_uses_fallback() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .returning(|_| Ok("I'd give this about a seven.".to_string()));
    let state = state_with(llm);

    let result = state
        .answer_evaluator
        .evaluate_answer(&closure_request("no idea"))
        .await;
    assert_eq!(result.method, EvaluationMethod::KeywordFallback);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.missed_points.len(), 2);
}

#[tokio::test]
async fn out_of_range_grader_score_is_clamped() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .returning(|_| Ok(r#"{"score": 42, "feedback": "wow"}"#.to_string()));
    let state = state_with(llm);

    let result = state
        .answer_evaluator
        .evaluate_answer(&closure_request("nothing relevant"))
        .await;
    // round(10 * 0.7 + 0) = 7
    assert_eq!(result.score, 7.0);
    assert_eq!(result.confidence, 0.8);
}

#[tokio::test]
async fn solution_review_passes_grader_markdown_through() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .withf(|req| req.messages[0].content.contains("PROBLEM: Rotate Array"))
        .returning(|_| Ok("## Review\nLooks correct.".to_string()));
    let state = state_with(llm);

    let feedback = state
        .answer_evaluator
        .review_solution(
            &ProblemBrief {
                title: "Rotate Array",
                description: "Rotate right by k",
                difficulty: "easy",
            },
            "function rotate(a, k) { return a; }",
            &[TestCaseResult::default()],
        )
        .await
        .unwrap();
    assert!(feedback.starts_with("## Review"));
}
