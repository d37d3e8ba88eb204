/// Fraction of expected-point vocabulary found in the answer, in `[0, 1]`.
///
/// Only words longer than three characters count as relevant. A relevant
/// word matches when some answer word contains it. Points with no relevant
/// words are not scored; if no point is scorable the result is `0.0`.
pub fn keyword_score(answer: &str, expected_points: &[String]) -> f64 {
    let answer_lower = answer.to_lowercase();
    let answer_words: Vec<&str> = answer_lower.split_whitespace().collect();

    let mut total = 0.0;
    let mut scored_points = 0usize;

    for point in expected_points {
        let point_lower = point.to_lowercase();
        let relevant: Vec<&str> = point_lower
            .split_whitespace()
            .filter(|w| w.chars().count() > 3)
            .collect();
        if relevant.is_empty() {
            continue;
        }

        let matched = relevant
            .iter()
            .filter(|word| answer_words.iter().any(|aw| aw.contains(*word)))
            .count();

        total += matched as f64 / relevant.len() as f64;
        scored_points += 1;
    }

    if scored_points == 0 {
        return 0.0;
    }
    total / scored_points as f64
}

/// Expected points that share no word with the answer.
pub fn find_missing_points(answer: &str, expected_points: &[String]) -> Vec<String> {
    let answer_lower = answer.to_lowercase();
    expected_points
        .iter()
        .filter(|point| {
            !point
                .to_lowercase()
                .split_whitespace()
                .any(|word| answer_lower.contains(word))
        })
        .cloned()
        .collect()
}
