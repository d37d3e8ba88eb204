use serde::{Deserialize, Serialize};

/// One question of a mock interview as recorded by the session owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionQuestion {
    pub question: String,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub missed_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: f64,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub weak_areas: Vec<String>,
}
