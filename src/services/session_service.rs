use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::question::Question;
use crate::models::quiz_session::QuizSession;
use crate::services::scoring_service::{QuizScore, ScoringService};

/// Per-user aggregate shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub total_sessions: i32,
    pub total_points: i32,
    pub average_accuracy: f64,
    pub performance: Vec<QuizPerformance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizPerformance {
    pub quiz_number: i32,
    pub accuracy: f64,
    pub points: i32,
    pub category: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionService {
    pool: PgPool,
}

impl SessionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Scores a finished quiz and records it as an immutable session, then
    /// refreshes the owner's stored totals. The stats refresh is
    /// best-effort; a failure there does not lose the session.
    pub async fn complete_quiz(
        &self,
        user_id: Uuid,
        category: &str,
        questions: &[Question],
        selections: &HashMap<usize, Vec<String>>,
        time_spent_seconds: i32,
    ) -> Result<(QuizSession, QuizScore)> {
        let score = ScoringService::score(questions, selections, time_spent_seconds);

        let session = sqlx::query_as::<_, QuizSession>(
            r#"INSERT INTO quiz_sessions
               (user_id, category, total_questions, correct_answers, total_points, time_spent_seconds)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, user_id, category, total_questions, correct_answers,
                         total_points, time_spent_seconds, completed_at"#,
        )
        .bind(user_id)
        .bind(category)
        .bind(score.total_questions)
        .bind(score.correct_answers)
        .bind(score.total_points)
        .bind(score.time_spent_seconds)
        .fetch_one(&self.pool)
        .await?;

        if let Err(err) = self.update_user_stats(user_id).await {
            tracing::warn!(error = ?err, %user_id, "failed to refresh user stats");
        }

        tracing::info!(%user_id, category, points = score.total_points, "quiz session recorded");
        Ok((session, score))
    }

    /// The user's sessions, newest first, optionally narrowed to one
    /// category. Read failures degrade to an empty history.
    pub async fn user_sessions(&self, user_id: Uuid, category: Option<&str>) -> Vec<QuizSession> {
        let result = match category {
            Some(category) => {
                sqlx::query_as::<_, QuizSession>(
                    r#"SELECT id, user_id, category, total_questions, correct_answers,
                              total_points, time_spent_seconds, completed_at
                       FROM quiz_sessions
                       WHERE user_id = $1 AND category = $2
                       ORDER BY completed_at DESC"#,
                )
                .bind(user_id)
                .bind(category)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, QuizSession>(
                    r#"SELECT id, user_id, category, total_questions, correct_answers,
                              total_points, time_spent_seconds, completed_at
                       FROM quiz_sessions
                       WHERE user_id = $1
                       ORDER BY completed_at DESC"#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        };

        match result {
            Ok(sessions) => sessions,
            Err(err) => {
                tracing::warn!(error = ?err, %user_id, "failed to load session history");
                Vec::new()
            }
        }
    }

    /// Aggregates the user's full history into dashboard stats. `None`
    /// when the user has no sessions yet, or when the read fails.
    pub async fn user_stats(&self, user_id: Uuid) -> Option<SessionStats> {
        let sessions = sqlx::query_as::<_, QuizSession>(
            r#"SELECT id, user_id, category, total_questions, correct_answers,
                      total_points, time_spent_seconds, completed_at
               FROM quiz_sessions
               WHERE user_id = $1
               ORDER BY completed_at"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;

        let sessions = match sessions {
            Ok(sessions) => sessions,
            Err(err) => {
                tracing::warn!(error = ?err, %user_id, "failed to load sessions for stats");
                return None;
            }
        };

        if sessions.is_empty() {
            return None;
        }

        Some(compute_stats(&sessions))
    }

    /// Recomputes the owner's stored totals from their full session list:
    /// session count, summed points, and the mean of per-session
    /// accuracies (zero-question sessions are left out of the mean).
    pub async fn update_user_stats(&self, user_id: Uuid) -> Result<()> {
        let sessions = sqlx::query_as::<_, QuizSession>(
            r#"SELECT id, user_id, category, total_questions, correct_answers,
                      total_points, time_spent_seconds, completed_at
               FROM quiz_sessions
               WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        if sessions.is_empty() {
            return Ok(());
        }

        let stats = compute_stats(&sessions);

        sqlx::query(
            r#"UPDATE users
               SET total_quizzes = $2, total_points = $3, average_accuracy = $4,
                   updated_at = NOW()
               WHERE id = $1"#,
        )
        .bind(user_id)
        .bind(stats.total_sessions)
        .bind(stats.total_points)
        .bind(stats.average_accuracy)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn compute_stats(sessions: &[QuizSession]) -> SessionStats {
    let total_sessions = sessions.len() as i32;
    let total_points: i32 = sessions.iter().map(|s| s.total_points).sum();

    let mut performance = Vec::new();
    let mut accuracies = Vec::new();
    for (idx, session) in sessions.iter().enumerate() {
        if session.total_questions > 0 {
            let accuracy = session.accuracy();
            performance.push(QuizPerformance {
                quiz_number: idx as i32 + 1,
                accuracy,
                points: session.total_points,
                category: session.category.clone(),
                completed_at: session.completed_at,
            });
            accuracies.push(accuracy);
        }
    }

    let average_accuracy = if accuracies.is_empty() {
        0.0
    } else {
        accuracies.iter().sum::<f64>() / accuracies.len() as f64
    };

    SessionStats {
        total_sessions,
        total_points,
        average_accuracy,
        performance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(total: i32, correct: i32, points: i32, category: &str) -> QuizSession {
        QuizSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category: category.to_string(),
            total_questions: total,
            correct_answers: correct,
            total_points: points,
            time_spent_seconds: 45,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn stats_average_is_the_mean_of_per_session_accuracies() {
        let sessions = vec![
            session(5, 4, 52, "Geography"),
            session(4, 1, 10, "Science"),
        ];

        let stats = compute_stats(&sessions);

        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_points, 62);
        assert_eq!(stats.average_accuracy, 52.5);
        assert_eq!(stats.performance.len(), 2);
        assert_eq!(stats.performance[0].quiz_number, 1);
        assert_eq!(stats.performance[1].category, "Science");
    }

    #[test]
    fn zero_question_sessions_are_excluded_from_the_mean() {
        let sessions = vec![session(5, 5, 50, "Geography"), session(0, 0, 0, "Science")];

        let stats = compute_stats(&sessions);

        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.average_accuracy, 100.0);
        assert_eq!(stats.performance.len(), 1);
    }
}
