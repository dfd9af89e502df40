use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A question as the rest of the application sees it, with its options
/// already decoded into strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub category: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    pub difficulty: String,
    pub points: i32,
}

/// Raw storage row. `options` stays as JSONB until mapping time so a
/// malformed row can be skipped without failing the whole fetch.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub category_id: String,
    pub question_text: String,
    pub options: JsonValue,
    pub correct_answer: i32,
    pub difficulty: String,
    pub points: i32,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl QuestionRow {
    /// Maps a stored row into a [`Question`], returning `None` when the
    /// required fields do not decode. `category` carries the display label
    /// the caller resolved for this row's category.
    pub fn into_question(self, category: &str) -> Option<Question> {
        if self.question_text.is_empty() {
            return None;
        }
        let options: Vec<String> = serde_json::from_value(self.options).ok()?;
        Some(Question {
            id: self.id,
            category: category.to_string(),
            question_text: self.question_text,
            options,
            correct_answer: self.correct_answer,
            difficulty: self.difficulty,
            points: self.points,
        })
    }
}
