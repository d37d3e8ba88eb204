use crate::models::interview::{SessionQuestion, SessionSummary};

const WEAK_SCORE_THRESHOLD: f64 = 7.0;
const MAX_WEAK_AREAS: usize = 5;

pub struct SessionService;

impl SessionService {
    /// Final score of a completed mock interview: the mean over answered
    /// questions, plus the most frequently missed points.
    pub fn summarize(questions: &[SessionQuestion]) -> SessionSummary {
        let answered: Vec<&SessionQuestion> = questions
            .iter()
            .filter(|q| q.user_answer.as_deref().is_some_and(|a| !a.is_empty()))
            .collect();

        let score = if answered.is_empty() {
            0.0
        } else {
            answered.iter().map(|q| q.score).sum::<f64>() / answered.len() as f64
        };

        SessionSummary {
            score,
            total_questions: questions.len(),
            answered_questions: answered.len(),
            weak_areas: Self::weak_areas(questions),
        }
    }

    /// Missed points from low-scoring questions, most frequent first. Ties
    /// keep the order in which points were first seen.
    pub fn weak_areas(questions: &[SessionQuestion]) -> Vec<String> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for q in questions.iter().filter(|q| q.score < WEAK_SCORE_THRESHOLD) {
            for point in &q.missed_points {
                match counts.iter_mut().find(|(p, _)| *p == point.as_str()) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((point.as_str(), 1)),
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .take(MAX_WEAK_AREAS)
            .map(|(p, _)| p.to_string())
            .collect()
    }
}
