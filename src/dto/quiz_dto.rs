use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::question::Question;
use crate::services::question_service::QuizSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub category: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    pub difficulty: String,
    pub points: i32,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            category: question.category,
            question_text: question.question_text,
            options: question.options,
            correct_answer: question.correct_answer,
            difficulty: question.difficulty,
            points: question.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub category: String,
    pub items: Vec<QuestionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestionPayload {
    #[validate(length(min = 1, message = "Question text must not be blank"))]
    pub question_text: String,
    #[validate(length(min = 2, max = 6, message = "A question needs between 2 and 6 options"))]
    pub options: Vec<String>,
    pub correct_answer: i32,
    pub difficulty: Option<String>,
    pub points: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuizPayload {
    #[validate(length(min = 1, message = "Category must not be blank"))]
    pub category: String,
    #[validate(
        length(min = 1, message = "A quiz needs at least one question"),
        nested
    )]
    pub questions: Vec<CreateQuestionPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummaryResponse {
    pub id: String,
    pub category: String,
    pub questions_count: i64,
}

impl From<QuizSummary> for QuizSummaryResponse {
    fn from(summary: QuizSummary) -> Self {
        Self {
            id: summary.id,
            category: summary.category,
            questions_count: summary.questions_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizListResponse {
    pub items: Vec<QuizSummaryResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResponse {
    pub inserted: u64,
}
