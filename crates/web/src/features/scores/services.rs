use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    dto::score::SubmitScoreRequest,
    error::{Result, StorageError},
    models::{Score, ScoreDetail},
    repository::{
        round::RoundRepository,
        score::{NewScore, ScoreRepository},
    },
    services::scoring,
};
use uuid::Uuid;

/// The scoring engine's write path: load the round, validate against its
/// rules, then commit the question flip and ledger append atomically.
/// Returns the recorded score and, for qna rounds, the consumed question
/// text for immediate judge-facing display.
pub async fn submit_score(
    pool: &PgPool,
    judge_id: Uuid,
    req: &SubmitScoreRequest,
) -> Result<(Score, Option<String>)> {
    let round_repo = RoundRepository::new(pool);
    let round = round_repo.find_by_id(req.round_id).await?;
    let questions = round_repo.list_questions(round.round_id).await?;

    let score = Decimal::from_f64_retain(req.score)
        .ok_or_else(|| StorageError::Validation("score must be a finite number".to_string()))?;

    let question = scoring::validate_submission(&round, &questions, score, req.question_id)?;
    let asked_question = question.map(|q| q.question_text.clone());

    let new = NewScore {
        round_id: round.round_id,
        judge_id,
        contestant_id: req.contestant_id,
        score,
        comment: req.comment.clone(),
        question_id: question.map(|q| q.question_id),
        question_text: asked_question.clone(),
    };

    let stored = ScoreRepository::new(pool).submit(&new).await?;

    Ok((stored, asked_question))
}

/// The joined ledger, in insertion order. Input to every aggregation view.
pub async fn list_score_details(
    pool: &PgPool,
    event_id: Option<Uuid>,
) -> Result<Vec<ScoreDetail>> {
    let repo = ScoreRepository::new(pool);
    repo.list_detailed(event_id).await
}
