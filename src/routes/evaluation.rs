use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::evaluation_dto::{
    CompleteSessionPayload, EvaluateAnswerPayload, EvaluateCodePayload, EvaluateCodeResponse,
    GenerateTestCasesPayload, ReviewSolutionPayload, ReviewSolutionResponse,
};
use crate::error::Result;
use crate::models::answer_evaluation::AnswerEvaluationRequest;
use crate::models::code_evaluation::{
    default_memory_limit, default_time_limit, CodeEvaluationRequest,
};
use crate::services::session_service::SessionService;
use crate::utils::prompts::ProblemBrief;
use crate::utils::test_case_generator::{generate_random_test_cases, generate_test_cases};
use crate::AppState;

#[axum::debug_handler]
pub async fn evaluate_answer(
    State(state): State<AppState>,
    Json(payload): Json<EvaluateAnswerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = AnswerEvaluationRequest {
        question: payload.question,
        user_answer: payload.answer,
        expected_points: payload.expected_points,
        topic: payload.topic,
    };
    let evaluation = state.answer_evaluator.evaluate_answer(&request).await;
    Ok(Json(evaluation))
}

#[axum::debug_handler]
pub async fn complete_session(
    Json(payload): Json<CompleteSessionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    Ok(Json(SessionService::summarize(&payload.questions)))
}

#[axum::debug_handler]
pub async fn evaluate_code(
    State(state): State<AppState>,
    Json(payload): Json<EvaluateCodePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = CodeEvaluationRequest {
        code: payload.code,
        language: payload.language.unwrap_or_else(|| "javascript".to_string()),
        function_name: payload.function_name,
        test_cases: payload.test_cases,
        time_limit: payload.time_limit.unwrap_or_else(default_time_limit),
        memory_limit: payload.memory_limit.unwrap_or_else(default_memory_limit),
    };
    let evaluation = state.code_evaluator.evaluate_code(&request).await?;
    Ok(Json(EvaluateCodeResponse {
        success: true,
        evaluation,
        evaluation_id: Uuid::new_v4(),
        evaluated_at: Utc::now(),
    }))
}

#[axum::debug_handler]
pub async fn review_solution(
    State(state): State<AppState>,
    Json(payload): Json<ReviewSolutionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let brief = ProblemBrief {
        title: &payload.title,
        description: &payload.description,
        difficulty: &payload.difficulty,
    };
    let feedback = state
        .answer_evaluator
        .review_solution(&brief, &payload.code, &payload.results)
        .await?;
    Ok(Json(ReviewSolutionResponse { feedback }))
}

#[axum::debug_handler]
pub async fn generate_cases(
    Json(payload): Json<GenerateTestCasesPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let mut cases = generate_test_cases(&payload.problem_type, &payload.difficulty);
    cases.extend(generate_random_test_cases(
        &payload.problem_type,
        payload.random_count,
        &mut rand::thread_rng(),
    ));
    Ok(Json(cases))
}
