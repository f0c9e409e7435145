pub mod generator;
pub mod model;
pub mod stats;

pub use generator::QuizGenerator;
pub use model::QuizQuestion;
pub use stats::{QuizStatistics, QuizStatsStore};
