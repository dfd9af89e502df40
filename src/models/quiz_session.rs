use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One completed quiz attempt. Rows are append-only: written once when a
/// user finishes a quiz and never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub total_points: i32,
    pub time_spent_seconds: i32,
    pub completed_at: DateTime<Utc>,
}

impl QuizSession {
    pub fn accuracy(&self) -> f64 {
        if self.total_questions > 0 {
            (self.correct_answers as f64 / self.total_questions as f64) * 100.0
        } else {
            0.0
        }
    }
}
