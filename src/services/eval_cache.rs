use crate::models::answer_evaluation::AnswerEvaluation;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
struct CachedEvaluation {
    stored_at: Instant,
    evaluation: AnswerEvaluation,
}

/// Process-local TTL cache of answer evaluations, shared across clones.
#[derive(Clone, Debug)]
pub struct ResultCache {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, CachedEvaluation>>>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// SHA-256 over the length-prefixed question and answer, so answers that
    /// share a long prefix never collide.
    pub fn key(question: &str, answer: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update((question.len() as u64).to_le_bytes());
        hasher.update(question.as_bytes());
        hasher.update((answer.len() as u64).to_le_bytes());
        hasher.update(answer.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn get(&self, key: &str) -> Option<AnswerEvaluation> {
        let mut entries = self.lock();
        let expired = entries
            .get(key)
            .map(|e| e.stored_at.elapsed() > self.ttl)?;
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|e| e.evaluation.clone())
    }

    pub fn set(&self, key: String, evaluation: AnswerEvaluation) {
        self.lock().insert(
            key,
            CachedEvaluation {
                stored_at: Instant::now(),
                evaluation,
            },
        );
    }

    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn flush(&self) {
        self.lock().clear();
    }

    /// Drops expired entries and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, e| e.stored_at.elapsed() <= ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock only means a panic mid-insert; the map itself is intact.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CachedEvaluation>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer_evaluation::EvaluationMethod;

    fn evaluation(score: f64) -> AnswerEvaluation {
        AnswerEvaluation {
            score,
            feedback: "ok".into(),
            missed_points: vec![],
            suggestions: vec![],
            confidence: 0.8,
            method: EvaluationMethod::Llm,
        }
    }

    #[test]
    fn key_distinguishes_shared_prefixes() {
        let long = "x".repeat(60);
        let a = ResultCache::key("q", &format!("{long}a"));
        let b = ResultCache::key("q", &format!("{long}b"));
        assert_ne!(a, b);
        assert_ne!(ResultCache::key("ab", "c"), ResultCache::key("a", "bc"));
        assert_eq!(a, ResultCache::key("q", &format!("{long}a")));
    }

    #[test]
    fn set_get_remove_flush() {
        let cache = ResultCache::default();
        cache.set("k1".into(), evaluation(7.0));
        cache.set("k2".into(), evaluation(3.0));
        assert_eq!(cache.get("k1").map(|e| e.score), Some(7.0));
        assert!(cache.remove("k1"));
        assert!(!cache.remove("k1"));
        assert_eq!(cache.len(), 1);
        cache.flush();
        assert!(cache.is_empty());
    }

    #[test]
    fn expired_entries_are_invisible_and_purged() {
        let cache = ResultCache::new(Duration::from_millis(10));
        cache.set("old".into(), evaluation(5.0));
        cache.set("older".into(), evaluation(4.0));
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(cache.get("old"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn clones_share_entries() {
        let cache = ResultCache::default();
        let other = cache.clone();
        other.set("k".into(), evaluation(9.0));
        assert!(cache.get("k").is_some());
    }
}
