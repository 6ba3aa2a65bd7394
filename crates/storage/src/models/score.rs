use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One ledger entry. Scores are append-only: no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Score {
    pub score_id: Uuid,
    pub round_id: Uuid,
    pub judge_id: Uuid,
    pub contestant_id: Uuid,
    pub score: Decimal,
    pub comment: Option<String>,
    pub question: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// Ledger entry joined with round/judge/contestant display identity and the
/// round ceiling. Fetched in ledger insertion order; every aggregation view
/// is a pure function of a slice of these.
#[derive(Debug, Clone, FromRow)]
pub struct ScoreDetail {
    pub score_id: Uuid,
    pub round_id: Uuid,
    pub round_name: String,
    pub max_score: Decimal,
    pub judge_id: Uuid,
    pub judge_name: String,
    pub contestant_id: Uuid,
    pub contestant_name: String,
    pub score: Decimal,
    pub comment: Option<String>,
    pub question: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
