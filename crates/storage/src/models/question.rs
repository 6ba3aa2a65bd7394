use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Single-use prompt owned by a qna round. `used` is flipped exactly once,
/// by the scoring engine's conditional update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Question {
    pub question_id: Uuid,
    pub round_id: Uuid,
    pub position: i32,
    pub question_text: String,
    pub used: bool,
}
