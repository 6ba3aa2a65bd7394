use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Score, ScoreDetail};

/// Fully validated submission, ready to commit.
#[derive(Debug, Clone)]
pub struct NewScore {
    pub round_id: Uuid,
    pub judge_id: Uuid,
    pub contestant_id: Uuid,
    pub score: Decimal,
    pub comment: Option<String>,
    pub question_id: Option<Uuid>,
    pub question_text: Option<String>,
}

/// The sole write path into the score ledger.
pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Commit a submission: flip the question's used flag (qna only) and
    /// append the ledger entry, atomically.
    ///
    /// The flip is a compare-and-set conditioned on `used = FALSE`. Two
    /// judges racing for the same question serialize on the row lock; the
    /// loser observes zero rows affected and the whole transaction rolls
    /// back without touching the ledger.
    pub async fn submit(&self, new: &NewScore) -> Result<Score> {
        let mut tx = self.pool.begin().await?;

        if let Some(question_id) = new.question_id {
            let updated = sqlx::query(
                r#"
                UPDATE questions
                SET used = TRUE
                WHERE question_id = $1 AND round_id = $2 AND used = FALSE
                "#,
            )
            .bind(question_id)
            .bind(new.round_id)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                // Either a concurrent submission won the race, or the
                // question list was replaced since validation.
                let exists: bool = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM questions WHERE question_id = $1 AND round_id = $2)",
                )
                .bind(question_id)
                .bind(new.round_id)
                .fetch_one(&mut *tx)
                .await?;

                return if exists {
                    Err(StorageError::Conflict("question already used".to_string()))
                } else {
                    Err(StorageError::NotFound("question"))
                };
            }
        }

        let score: Score = sqlx::query_as(
            r#"
            INSERT INTO scores (round_id, judge_id, contestant_id, score, comment, question)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING score_id, round_id, judge_id, contestant_id, score, comment, question, created_at
            "#,
        )
        .bind(new.round_id)
        .bind(new.judge_id)
        .bind(new.contestant_id)
        .bind(new.score)
        .bind(&new.comment)
        .bind(&new.question_text)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.code().as_deref() == Some("23503") {
                    return match db_err.constraint() {
                        Some("scores_contestant_id_fkey") => StorageError::NotFound("contestant"),
                        Some("scores_judge_id_fkey") => StorageError::NotFound("judge"),
                        _ => StorageError::NotFound("round"),
                    };
                }
            }
            StorageError::from(e)
        })?;

        tx.commit().await?;

        Ok(score)
    }

    /// The joined ledger in insertion order. Every aggregation view is
    /// derived from this read.
    pub async fn list_detailed(&self, event_id: Option<Uuid>) -> Result<Vec<ScoreDetail>> {
        let entries: Vec<ScoreDetail> = sqlx::query_as(
            r#"
            SELECT s.score_id, s.round_id, r.name AS round_name, r.max_score,
                   s.judge_id, j.name AS judge_name,
                   s.contestant_id, c.name AS contestant_name,
                   s.score, s.comment, s.question, s.created_at
            FROM scores s
            INNER JOIN rounds r ON s.round_id = r.round_id
            INNER JOIN judges j ON s.judge_id = j.judge_id
            INNER JOIN contestants c ON s.contestant_id = c.contestant_id
            WHERE ($1::uuid IS NULL OR r.event_id = $1)
            ORDER BY s.created_at ASC, s.score_id ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}
