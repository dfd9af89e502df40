use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::quiz_session::QuizSession;

/// Which column the ranking list is ordered by. Switching order re-sorts
/// the already-aggregated rows; it never re-runs the fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingOrder {
    #[default]
    Points,
    Questions,
}

/// Per-user accumulation over all of that user's sessions. Derived only;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRankingData {
    pub user_id: Uuid,
    pub nickname: String,
    pub total_points: i32,
    pub total_questions: i32,
    pub total_quizzes: i32,
    pub average_accuracy: f64,
}

#[derive(Clone)]
pub struct RankingService {
    pool: PgPool,
}

impl RankingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the ranking from every recorded session. Any read failure
    /// degrades to an empty list; partial results are never shown.
    pub async fn rankings(&self, order: RankingOrder) -> Vec<UserRankingData> {
        let sessions = match sqlx::query_as::<_, QuizSession>(
            r#"SELECT id, user_id, category, total_questions, correct_answers,
                      total_points, time_spent_seconds, completed_at
               FROM quiz_sessions"#,
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(sessions) => sessions,
            Err(err) => {
                tracing::warn!(error = ?err, "failed to load sessions for ranking");
                return Vec::new();
            }
        };

        let nicknames = self.nicknames().await;
        let mut rows = aggregate_rankings(&sessions, &nicknames);
        sort_rankings(&mut rows, order);
        rows
    }

    async fn nicknames(&self) -> HashMap<Uuid, String> {
        let rows = sqlx::query_as::<_, (Uuid, String)>("SELECT id, nickname FROM users")
            .fetch_all(&self.pool)
            .await;
        match rows {
            Ok(rows) => rows.into_iter().collect(),
            Err(err) => {
                tracing::warn!(error = ?err, "failed to load nicknames for ranking");
                HashMap::new()
            }
        }
    }
}

/// Folds sessions, in delivery order, into one row per distinct user.
///
/// The accuracy column is the running mean of per-session accuracies, not
/// the accuracy of the summed counts; the two differ when sessions have
/// different question counts.
pub fn aggregate_rankings(
    sessions: &[QuizSession],
    nicknames: &HashMap<Uuid, String>,
) -> Vec<UserRankingData> {
    let mut index_by_user: HashMap<Uuid, usize> = HashMap::new();
    let mut rows: Vec<UserRankingData> = Vec::new();

    for session in sessions {
        let row_index = match index_by_user.get(&session.user_id) {
            Some(existing) => *existing,
            None => {
                rows.push(UserRankingData {
                    user_id: session.user_id,
                    nickname: nicknames
                        .get(&session.user_id)
                        .cloned()
                        .unwrap_or_default(),
                    total_points: 0,
                    total_questions: 0,
                    total_quizzes: 0,
                    average_accuracy: 0.0,
                });
                index_by_user.insert(session.user_id, rows.len() - 1);
                rows.len() - 1
            }
        };

        let row = &mut rows[row_index];
        let accuracy = session.accuracy();
        row.average_accuracy = (row.average_accuracy * row.total_quizzes as f64 + accuracy)
            / (row.total_quizzes as f64 + 1.0);
        row.total_points += session.total_points;
        row.total_questions += session.total_questions;
        row.total_quizzes += 1;
    }

    rows
}

pub fn sort_rankings(rows: &mut [UserRankingData], order: RankingOrder) {
    match order {
        RankingOrder::Points => rows.sort_by(|a, b| b.total_points.cmp(&a.total_points)),
        RankingOrder::Questions => rows.sort_by(|a, b| b.total_questions.cmp(&a.total_questions)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(user_id: Uuid, total: i32, correct: i32, points: i32) -> QuizSession {
        QuizSession {
            id: Uuid::new_v4(),
            user_id,
            category: "General".to_string(),
            total_questions: total,
            correct_answers: correct,
            total_points: points,
            time_spent_seconds: 60,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn running_mean_of_80_and_60_is_exactly_70() {
        let user = Uuid::new_v4();
        // 80% of 5, then 60% of 5
        let sessions = vec![session(user, 5, 4, 40), session(user, 5, 3, 30)];

        let rows = aggregate_rankings(&sessions, &HashMap::new());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].average_accuracy, 70.0);
    }

    // The running mean weights every session equally regardless of size;
    // it is NOT the accuracy of the combined counts. 100% of 1 question
    // then 50% of 10 questions averages to 75, while combined counts would
    // give 6/11.
    #[test]
    fn running_mean_is_not_combined_count_accuracy() {
        let user = Uuid::new_v4();
        let sessions = vec![session(user, 1, 1, 10), session(user, 10, 5, 50)];

        let rows = aggregate_rankings(&sessions, &HashMap::new());

        assert_eq!(rows[0].average_accuracy, 75.0);
        assert_eq!(rows[0].total_quizzes, 2);
        assert_eq!(rows[0].total_questions, 11);
        let combined = 6.0 / 11.0 * 100.0;
        assert!((rows[0].average_accuracy - combined).abs() > 1.0);
    }

    #[test]
    fn totals_accumulate_by_summation() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let sessions = vec![
            session(user, 5, 5, 65),
            session(other, 3, 1, 10),
            session(user, 3, 2, 20),
        ];

        let rows = aggregate_rankings(&sessions, &HashMap::new());

        assert_eq!(rows.len(), 2);
        let row = rows.iter().find(|r| r.user_id == user).unwrap();
        assert_eq!(row.total_points, 85);
        assert_eq!(row.total_questions, 8);
        assert_eq!(row.total_quizzes, 2);
    }

    #[test]
    fn zero_question_sessions_fold_in_as_zero_accuracy() {
        let user = Uuid::new_v4();
        let sessions = vec![session(user, 5, 5, 50), session(user, 0, 0, 0)];

        let rows = aggregate_rankings(&sessions, &HashMap::new());

        assert_eq!(rows[0].average_accuracy, 50.0);
        assert_eq!(rows[0].total_quizzes, 2);
    }

    #[test]
    fn order_selection_re_sorts_the_same_rows() {
        let many_points = Uuid::new_v4();
        let many_questions = Uuid::new_v4();
        let sessions = vec![
            session(many_points, 2, 2, 100),
            session(many_questions, 20, 10, 50),
        ];

        let rows = aggregate_rankings(&sessions, &HashMap::new());

        let mut by_points = rows.clone();
        sort_rankings(&mut by_points, RankingOrder::Points);
        assert_eq!(by_points[0].user_id, many_points);

        let mut by_questions = rows.clone();
        sort_rankings(&mut by_questions, RankingOrder::Questions);
        assert_eq!(by_questions[0].user_id, many_questions);

        // Same aggregates either way, only the order differs.
        let mut a = by_points.clone();
        let mut b = by_questions.clone();
        a.sort_by_key(|r| r.user_id);
        b.sort_by_key(|r| r.user_id);
        assert_eq!(a, b);
    }

    #[test]
    fn nicknames_attach_when_known() {
        let user = Uuid::new_v4();
        let mut nicknames = HashMap::new();
        nicknames.insert(user, "ace".to_string());

        let rows = aggregate_rankings(&[session(user, 2, 1, 10)], &nicknames);

        assert_eq!(rows[0].nickname, "ace");

        let rows = aggregate_rankings(&[session(Uuid::new_v4(), 2, 1, 10)], &nicknames);
        assert_eq!(rows[0].nickname, "");
    }
}
