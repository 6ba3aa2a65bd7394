use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    dto::round::{
        CreateRoundRequest, RoundListEntry, RoundResponse, UpdateRoundRequest,
        normalize_questions,
    },
    error::{Result, StorageError},
    repository::round::RoundRepository,
};
use uuid::Uuid;

pub async fn list_rounds(pool: &PgPool, event_id: Option<Uuid>) -> Result<Vec<RoundListEntry>> {
    let repo = RoundRepository::new(pool);
    repo.list(event_id).await
}

pub async fn get_round(pool: &PgPool, id: Uuid) -> Result<RoundResponse> {
    let repo = RoundRepository::new(pool);
    let round = repo.find_by_id(id).await?;
    let questions = repo.list_questions(id).await?;

    Ok(RoundResponse::from_parts(round, questions))
}

pub async fn create_round(pool: &PgPool, req: &CreateRoundRequest) -> Result<RoundResponse> {
    let question_texts =
        normalize_questions(req.questions.as_ref()).map_err(StorageError::Validation)?;
    let max_score = to_decimal(req.max_score, "max_score")?;

    let repo = RoundRepository::new(pool);
    let (round, questions) = repo
        .create(
            req.event_id,
            &req.name,
            &req.round_type,
            max_score,
            &question_texts,
        )
        .await?;

    Ok(RoundResponse::from_parts(round, questions))
}

/// Partial update. A supplied question list destructively replaces the old
/// one; the round type is immutable once ledger entries reference the round.
pub async fn update_round(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateRoundRequest,
) -> Result<RoundResponse> {
    let repo = RoundRepository::new(pool);
    let current = repo.find_by_id(id).await?;

    if let Some(ref round_type) = req.round_type {
        if *round_type != current.round_type && repo.scores_exist(id).await? {
            return Err(StorageError::Conflict(
                "round type cannot change once scores exist".to_string(),
            ));
        }
    }

    let question_texts = match req.questions.as_ref() {
        Some(input) => Some(normalize_questions(Some(input)).map_err(StorageError::Validation)?),
        None => None,
    };

    let name = req.name.as_deref().unwrap_or(&current.name);
    let round_type = req.round_type.as_deref().unwrap_or(&current.round_type);
    let max_score = match req.max_score {
        Some(value) => to_decimal(value, "max_score")?,
        None => current.max_score,
    };

    let (round, questions) = repo
        .update(id, name, round_type, max_score, question_texts.as_deref())
        .await?;

    Ok(RoundResponse::from_parts(round, questions))
}

pub async fn delete_round(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = RoundRepository::new(pool);
    repo.delete(id).await
}

fn to_decimal(value: f64, field: &str) -> Result<Decimal> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| StorageError::Validation(format!("{field} must be a finite number")))
}
