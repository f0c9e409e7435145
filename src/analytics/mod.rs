use serde::{Serialize, Deserialize};
use crate::progress::LearningStats;
use crate::quiz::QuizStatistics;

/// Everything the profile screen shows, in one payload
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub words_learned: usize,
    pub recently_learned: usize,
    pub needs_review: usize,
    pub quizzes_taken: u32,
    pub average_score: u32,
    pub streak: u32,
    pub weekly_progress: [u32; 7],
}

pub fn compute_profile_summary(learning: &LearningStats, quiz: &QuizStatistics) -> ProfileSummary {
    ProfileSummary {
        words_learned: learning.total_learned,
        recently_learned: learning.recently_learned,
        needs_review: learning.needs_review,
        quizzes_taken: quiz.quizzes_taken,
        average_score: quiz.average_score,
        streak: quiz.streak,
        weekly_progress: quiz.weekly_progress,
    }
}
