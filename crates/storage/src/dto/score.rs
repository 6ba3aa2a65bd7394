use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::decimal_to_f64;
use crate::models::Score;

/// Request payload for a judge's score submission. The judge identity comes
/// from the authenticated session, never from the body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitScoreRequest {
    pub round_id: Uuid,

    pub contestant_id: Uuid,

    #[validate(range(min = 0.0, message = "score must be non-negative"))]
    pub score: f64,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,

    /// Required for qna rounds, rejected for normal rounds.
    pub question_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScoreResponse {
    pub score_id: Uuid,
    pub round_id: Uuid,
    pub judge_id: Uuid,
    pub contestant_id: Uuid,
    pub score: f64,
    pub comment: Option<String>,
    pub question: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<Score> for ScoreResponse {
    fn from(score: Score) -> Self {
        Self {
            score_id: score.score_id,
            round_id: score.round_id,
            judge_id: score.judge_id,
            contestant_id: score.contestant_id,
            score: decimal_to_f64(score.score),
            comment: score.comment,
            question: score.question,
            created_at: score.created_at,
        }
    }
}

/// Submission result: the recorded score plus, for qna rounds, the question
/// the judge just consumed ("you asked: ...").
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitScoreResponse {
    pub score: ScoreResponse,
    pub asked_question: Option<String>,
}
