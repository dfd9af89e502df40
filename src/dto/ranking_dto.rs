use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::ranking_service::{RankingOrder, UserRankingData};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RankingQuery {
    pub order: Option<RankingOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingRowResponse {
    pub user_id: Uuid,
    pub nickname: String,
    pub total_points: i32,
    pub total_questions: i32,
    pub total_quizzes: i32,
    pub average_accuracy: f64,
}

impl From<UserRankingData> for RankingRowResponse {
    fn from(row: UserRankingData) -> Self {
        Self {
            user_id: row.user_id,
            nickname: row.nickname,
            total_points: row.total_points,
            total_questions: row.total_questions,
            total_quizzes: row.total_quizzes,
            average_accuracy: row.average_accuracy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingListResponse {
    pub order: RankingOrder,
    pub items: Vec<RankingRowResponse>,
}
