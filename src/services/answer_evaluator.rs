use crate::error::{Error, Result};
use crate::models::answer_evaluation::{
    AnswerEvaluation, AnswerEvaluationRequest, EvaluationMethod,
};
use crate::models::code_evaluation::TestCaseResult;
use crate::services::eval_cache::ResultCache;
use crate::services::llm_service::{ChatCompletion, ChatMessage, ChatRequest};
use crate::utils::keywords::{find_missing_points, keyword_score};
use crate::utils::prompts::{evaluation_prompt, solution_review_prompt, ProblemBrief};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

const LLM_WEIGHT: f64 = 0.7;
const KEYWORD_WEIGHT: f64 = 0.3;
const DEFAULT_CONFIDENCE: f64 = 0.8;
const FALLBACK_CONFIDENCE: f64 = 0.6;
const FALLBACK_FEEDBACK: &str = "Evaluated using keyword matching (LLM unavailable)";
const FALLBACK_SUGGESTION: &str = "Try to provide more detailed explanations with examples";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmVerdict {
    #[serde(deserialize_with = "lenient_score")]
    score: f64,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    missed_points: Option<Vec<String>>,
    #[serde(default)]
    suggestions: Option<Vec<String>>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Grader output before reconciliation with the keyword score.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmGrade {
    pub score: f64,
    pub feedback: String,
    pub missed_points: Vec<String>,
    pub suggestions: Vec<String>,
    pub confidence: f64,
}

#[derive(Clone)]
pub struct AnswerEvaluator {
    llm: Arc<dyn ChatCompletion>,
    cache: ResultCache,
    model: String,
}

impl AnswerEvaluator {
    pub fn new(llm: Arc<dyn ChatCompletion>, cache: ResultCache, model: String) -> Self {
        Self { llm, cache, model }
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Scores a free-text answer on a 0-10 scale. Never fails: grader errors
    /// degrade to keyword matching, and those results are not cached.
    pub async fn evaluate_answer(&self, request: &AnswerEvaluationRequest) -> AnswerEvaluation {
        let cache_key = ResultCache::key(&request.question, &request.user_answer);
        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!("Answer evaluation served from cache");
            return cached;
        }

        let keyword = keyword_score(&request.user_answer, &request.expected_points);

        match self.evaluate_with_llm(request).await {
            Ok(grade) => {
                let result = AnswerEvaluation {
                    score: final_score(grade.score, keyword),
                    feedback: grade.feedback,
                    missed_points: grade.missed_points,
                    suggestions: grade.suggestions,
                    confidence: grade.confidence,
                    method: EvaluationMethod::Llm,
                };
                self.cache.set(cache_key, result.clone());
                result
            }
            Err(e) => {
                tracing::warn!(error = %e, "LLM evaluation failed, using keyword fallback");
                fallback_evaluation(&request.user_answer, &request.expected_points, keyword)
            }
        }
    }

    pub async fn evaluate_with_llm(&self, request: &AnswerEvaluationRequest) -> Result<LlmGrade> {
        let prompt = evaluation_prompt(
            &request.question,
            &request.user_answer,
            &request.expected_points,
            &request.topic,
        );
        let content = self
            .llm
            .complete(ChatRequest {
                model: self.model.clone(),
                messages: vec![ChatMessage::user(prompt)],
                temperature: 0.1,
                max_tokens: 500,
            })
            .await?;
        parse_llm_response(&content)
    }

    /// Markdown code review of a judged solution.
    pub async fn review_solution(
        &self,
        problem: &ProblemBrief<'_>,
        code: &str,
        results: &[TestCaseResult],
    ) -> Result<String> {
        let prompt = solution_review_prompt(problem, code, results);
        let feedback = self
            .llm
            .complete(ChatRequest {
                model: self.model.clone(),
                messages: vec![ChatMessage::user(prompt)],
                temperature: 0.3,
                max_tokens: 800,
            })
            .await?;
        tracing::info!(problem = problem.title, "Solution review generated");
        Ok(feedback)
    }
}

pub fn parse_llm_response(content: &str) -> Result<LlmGrade> {
    let verdict: LlmVerdict = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| Error::Llm(format!("Failed to parse LLM response: {}", e)))?;

    let confidence = match verdict.confidence {
        Some(c) if c != 0.0 => c,
        _ => DEFAULT_CONFIDENCE,
    };

    Ok(LlmGrade {
        score: verdict.score.clamp(0.0, 10.0),
        feedback: verdict.feedback.unwrap_or_default(),
        missed_points: verdict.missed_points.unwrap_or_default(),
        suggestions: verdict.suggestions.unwrap_or_default(),
        confidence,
    })
}

/// Accepts `8`, `8.5` or `"8"`. Anything else is a grader failure.
fn lenient_score<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    score
        .filter(|s| s.is_finite())
        .ok_or_else(|| D::Error::custom("score is not a number"))
}

/// Models sometimes wrap the JSON object in a ```json fence.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Language tag, any case, up to the first newline.
    let inner = match inner.split_once('\n') {
        Some((tag, rest)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => rest,
        _ => inner,
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

pub fn final_score(llm_score: f64, keyword_score: f64) -> f64 {
    (llm_score * LLM_WEIGHT + keyword_score * 10.0 * KEYWORD_WEIGHT).round()
}

pub fn fallback_evaluation(
    user_answer: &str,
    expected_points: &[String],
    keyword_score: f64,
) -> AnswerEvaluation {
    AnswerEvaluation {
        score: keyword_score * 10.0,
        feedback: FALLBACK_FEEDBACK.to_string(),
        missed_points: find_missing_points(user_answer, expected_points),
        suggestions: vec![FALLBACK_SUGGESTION.to_string()],
        confidence: FALLBACK_CONFIDENCE,
        method: EvaluationMethod::KeywordFallback,
    }
}
