use crate::models::code_evaluation::TestCaseResult;

pub fn evaluation_prompt(
    question: &str,
    user_answer: &str,
    expected_points: &[String],
    topic: &str,
) -> String {
    let points = serde_json::to_string(expected_points).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"
You are an expert technical interviewer evaluating a candidate's response.

TOPIC: {topic}
QUESTION: "{question}"
EXPECTED KEY POINTS: {points}
CANDIDATE'S ANSWER: "{user_answer}"

Please evaluate the answer and provide:
1. Score (0-10) based on completeness and accuracy
2. Detailed feedback
3. Missed expected points (if any)
4. Specific suggestions for improvement
5. Confidence level (0-1)

Return JSON format only:
{{
  "score": number,
  "feedback": string,
  "missedPoints": string[],
  "suggestions": string[],
  "confidence": number
}}

Be strict but fair. Consider:
- Technical accuracy
- Completeness of explanation
- Examples provided
- Clarity of communication
- Relevance to question
"#
    )
}

pub struct ProblemBrief<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub difficulty: &'a str,
}

pub fn solution_review_prompt(
    problem: &ProblemBrief<'_>,
    code: &str,
    results: &[TestCaseResult],
) -> String {
    let results_json =
        serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"
You are an expert programming interviewer. Analyze this code solution:

PROBLEM: {title}
DESCRIPTION: {description}
DIFFICULTY: {difficulty}

USER'S CODE:
{code}

TEST RESULTS:
{results_json}

Provide constructive feedback on:
1. Code correctness and edge cases
2. Time and space complexity
3. Code readability and style
4. Potential improvements
5. Best practices followed or violated

Return feedback in markdown format with specific examples.
"#,
        title = problem.title,
        description = problem.description,
        difficulty = problem.difficulty,
    )
}
