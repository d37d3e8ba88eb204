pub mod answer_evaluator;
pub mod code_evaluator;
pub mod eval_cache;
pub mod judge_service;
pub mod llm_service;
pub mod session_service;
