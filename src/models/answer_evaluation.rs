use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerEvaluationRequest {
    pub question: String,
    pub user_answer: String,
    pub expected_points: Vec<String>,
    pub topic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMethod {
    Llm,
    KeywordFallback,
}

/// Score is on a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub score: f64,
    pub feedback: String,
    pub missed_points: Vec<String>,
    pub suggestions: Vec<String>,
    pub confidence: f64,
    pub method: EvaluationMethod,
}
