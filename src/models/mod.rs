pub mod answer_evaluation;
pub mod code_evaluation;
pub mod interview;
pub mod judge;
