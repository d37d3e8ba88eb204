pub mod code_sanitizer;
pub mod keywords;
pub mod prompts;
pub mod test_case_generator;
