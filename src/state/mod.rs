pub mod app;
pub mod session;

pub use app::AppState;
pub use session::{AnswerOutcome, QuizSession, QuizState};
