use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::decimal_to_f64;
use crate::models::ScoreDetail;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContestantInfo {
    pub contestant_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JudgeInfo {
    pub judge_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoundInfo {
    pub round_id: Uuid,
    pub name: String,
}

/// One ledger entry with display identity (the flat detail view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreEntryResponse {
    pub score_id: Uuid,
    pub round: RoundInfo,
    pub judge: JudgeInfo,
    pub contestant: ContestantInfo,
    pub score: f64,
    pub comment: Option<String>,
    pub question: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<ScoreDetail> for ScoreEntryResponse {
    fn from(detail: ScoreDetail) -> Self {
        Self {
            score_id: detail.score_id,
            round: RoundInfo {
                round_id: detail.round_id,
                name: detail.round_name,
            },
            judge: JudgeInfo {
                judge_id: detail.judge_id,
                name: detail.judge_name,
            },
            contestant: ContestantInfo {
                contestant_id: detail.contestant_id,
                name: detail.contestant_name,
            },
            score: decimal_to_f64(detail.score),
            comment: detail.comment,
            question: detail.question,
            created_at: detail.created_at,
        }
    }
}

/// Per-contestant totals across all rounds and judges, ranked by total
/// score descending (ties keep submission order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContestantAnalyticsEntry {
    pub rank: i64,
    pub contestant: ContestantInfo,
    pub total_score: f64,
    pub average_score: f64,
    pub score_count: i64,
}

/// Per-(contestant, round) aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContestantRoundEntry {
    pub contestant: ContestantInfo,
    pub round: RoundInfo,
    pub total_score: f64,
    pub average_score: f64,
    pub score_count: i64,
}

/// All of one judge's entries (detail view, no aggregation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JudgeBreakdownEntry {
    pub judge: JudgeInfo,
    pub scores: Vec<ScoreEntryResponse>,
}

/// Every judge's score for one (contestant, round) pair, with aggregates.
/// `max_possible_score` is the round's fixed ceiling, not multiplied by
/// the number of judges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoundSummaryEntry {
    pub contestant: ContestantInfo,
    pub round: RoundInfo,
    pub judge_scores: Vec<JudgeScore>,
    pub total_score: f64,
    pub average_score: f64,
    pub score_count: i64,
    pub max_possible_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JudgeScore {
    pub judge: JudgeInfo,
    pub score: f64,
    pub comment: Option<String>,
}
