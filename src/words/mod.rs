pub mod lists;
pub mod model;
pub mod normalize;
pub mod source;

pub use model::{Difficulty, WordRecord};
pub use source::WordSource;
