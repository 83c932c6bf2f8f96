pub mod marker_aggregator;
pub mod question_generator;

pub use marker_aggregator::MarkerAggregator;
pub use question_generator::{QuestionGenerator, QuestionSource};
