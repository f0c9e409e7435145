pub mod model;
pub mod store;

pub use model::{LearnedWordEntry, LearnedWords, LearningStats};
pub use store::LearningProgressStore;
