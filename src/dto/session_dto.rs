use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::quiz_session::QuizSession;
use crate::services::scoring_service::QuizScore;
use crate::services::session_service::{QuizPerformance, SessionStats};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitQuizPayload {
    #[validate(length(min = 1, message = "Category must not be blank"))]
    pub category: String,
    /// Selected option texts keyed by question index. Questions without an
    /// entry count as unanswered.
    #[serde(default)]
    pub selections: HashMap<usize, Vec<String>>,
    #[validate(range(min = 0, message = "Elapsed time must not be negative"))]
    pub time_spent_seconds: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuizResponse {
    pub session_id: Uuid,
    pub category: String,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub accuracy: f64,
    pub total_points: i32,
    pub time_spent_seconds: i32,
    pub completed_at: DateTime<Utc>,
}

impl SubmitQuizResponse {
    pub fn new(session: QuizSession, score: QuizScore) -> Self {
        Self {
            session_id: session.id,
            category: session.category,
            correct_answers: score.correct_answers,
            total_questions: score.total_questions,
            accuracy: score.accuracy,
            total_points: score.total_points,
            time_spent_seconds: score.time_spent_seconds,
            completed_at: session.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HistoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub category: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub total_points: i32,
    pub accuracy: f64,
    pub time_spent_seconds: i32,
    pub completed_at: DateTime<Utc>,
}

impl From<QuizSession> for SessionResponse {
    fn from(session: QuizSession) -> Self {
        Self {
            id: session.id,
            accuracy: session.accuracy(),
            category: session.category,
            total_questions: session.total_questions,
            correct_answers: session.correct_answers,
            total_points: session.total_points,
            time_spent_seconds: session.time_spent_seconds,
            completed_at: session.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub items: Vec<SessionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub quiz_number: i32,
    pub accuracy: f64,
    pub points: i32,
    pub category: String,
    pub completed_at: DateTime<Utc>,
}

impl From<QuizPerformance> for PerformancePoint {
    fn from(point: QuizPerformance) -> Self {
        Self {
            quiz_number: point.quiz_number,
            accuracy: point.accuracy,
            points: point.points,
            category: point.category,
            completed_at: point.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_sessions: i32,
    pub total_points: i32,
    pub average_accuracy: f64,
    pub performance: Vec<PerformancePoint>,
}

impl From<SessionStats> for StatsResponse {
    fn from(stats: SessionStats) -> Self {
        Self {
            total_sessions: stats.total_sessions,
            total_points: stats.total_points,
            average_accuracy: stats.average_accuracy,
            performance: stats.performance.into_iter().map(Into::into).collect(),
        }
    }
}
