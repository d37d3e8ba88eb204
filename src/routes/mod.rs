pub mod evaluation;
pub mod health;
