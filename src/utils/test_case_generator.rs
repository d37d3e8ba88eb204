use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::code_evaluation::TestCase;

const WORDS: &[&str] = &[
    "hello",
    "world",
    "code",
    "interview",
    "preparation",
    "ai",
    "system",
];

fn case(input: &str, expected_output: &str) -> TestCase {
    TestCase {
        input: input.to_string(),
        expected_output: expected_output.to_string(),
    }
}

/// Canned cases for problems that ship without their own.
pub fn generate_test_cases(problem_type: &str, difficulty: &str) -> Vec<TestCase> {
    match problem_type {
        "sliding_window" if difficulty == "easy" => vec![
            case("[1,2,3,4,5], 2", "9"),
            case("[2,1,5,1,3,2], 3", "9"),
        ],
        "sliding_window" => vec![
            case("[1,3,-1,-3,5,3,6,7], 3", "[3,3,5,5,6,7]"),
            case("[1,-1], 1", "[1,-1]"),
        ],
        "two_pointers" => vec![
            case("[1,1,2,2,3]", "3"),
            case("[0,0,1,1,1,2,2,3,3,4]", "5"),
        ],
        "arrays" => vec![
            case("[1,2,3,4,5], 2", "[4,5,1,2,3]"),
            case("[-1,-100,3,99], 2", "[3,99,-1,-100]"),
        ],
        _ => vec![case("[]", "[]"), case("[1]", "[1]")],
    }
}

pub fn generate_random_test_cases<R: Rng + ?Sized>(
    problem_type: &str,
    count: usize,
    rng: &mut R,
) -> Vec<TestCase> {
    (0..count)
        .map(|_| match problem_type {
            "arrays" => random_rotation_case(rng),
            "strings" => random_reverse_words_case(rng),
            _ => random_sum_case(rng),
        })
        .collect()
}

fn to_json_array(values: &[i64]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn random_rotation_case<R: Rng + ?Sized>(rng: &mut R) -> TestCase {
    let len = rng.gen_range(5..15);
    let arr: Vec<i64> = (0..len).map(|_| rng.gen_range(0..100)).collect();
    let k = rng.gen_range(1..=5);

    let mut rotated = arr[len - k..].to_vec();
    rotated.extend_from_slice(&arr[..len - k]);

    TestCase {
        input: format!("{}, {}", to_json_array(&arr), k),
        expected_output: to_json_array(&rotated),
    }
}

fn random_reverse_words_case<R: Rng + ?Sized>(rng: &mut R) -> TestCase {
    let mut words = WORDS.to_vec();
    words.shuffle(rng);
    let picked = &words[..3];
    let sentence = picked.join(" ");
    let reversed: Vec<&str> = picked.iter().rev().copied().collect();

    TestCase {
        input: serde_json::Value::from(sentence).to_string(),
        expected_output: serde_json::Value::from(reversed.join(" ")).to_string(),
    }
}

fn random_sum_case<R: Rng + ?Sized>(rng: &mut R) -> TestCase {
    let a: i64 = rng.gen_range(0..100);
    let b: i64 = rng.gen_range(0..100);
    TestCase {
        input: format!("{}, {}", a, b),
        expected_output: (a + b).to_string(),
    }
}
