pub mod evaluator;
pub mod runner;

pub use evaluator::evaluate;
pub use runner::{BatchRunner, BatchSummary};
