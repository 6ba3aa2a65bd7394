use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::round::{EventInfo, RoundListEntry};
use crate::error::{Result, StorageError};
use crate::models::{Question, Round};

#[derive(FromRow)]
struct RoundListRow {
    round_id: Uuid,
    event_id: Uuid,
    event_name: String,
    name: String,
    round_type: String,
    max_score: Decimal,
    question_count: i64,
    created_at: chrono::NaiveDateTime,
}

/// Repository for round definitions and their embedded question lists
pub struct RoundRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RoundRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all rounds, optionally scoped to one event, joined with event
    /// identity for display.
    pub async fn list(&self, event_id: Option<Uuid>) -> Result<Vec<RoundListEntry>> {
        let rows: Vec<RoundListRow> = sqlx::query_as(
            r#"
            SELECT r.round_id, r.event_id, e.name AS event_name, r.name,
                   r.round_type, r.max_score,
                   (SELECT COUNT(*) FROM questions q WHERE q.round_id = r.round_id) AS question_count,
                   r.created_at
            FROM rounds r
            INNER JOIN events e ON r.event_id = e.event_id
            WHERE ($1::uuid IS NULL OR r.event_id = $1)
            ORDER BY r.created_at ASC, r.round_id ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| RoundListEntry {
                round_id: row.round_id,
                event: EventInfo {
                    event_id: row.event_id,
                    name: row.event_name,
                },
                name: row.name,
                round_type: row.round_type,
                max_score: crate::dto::decimal_to_f64(row.max_score),
                question_count: row.question_count,
                created_at: row.created_at,
            })
            .collect();

        Ok(entries)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Round> {
        let round: Option<Round> = sqlx::query_as(
            r#"
            SELECT round_id, event_id, name, round_type, max_score, created_at
            FROM rounds
            WHERE round_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        round.ok_or(StorageError::NotFound("round"))
    }

    /// Ordered question list for a round.
    pub async fn list_questions(&self, round_id: Uuid) -> Result<Vec<Question>> {
        let questions: Vec<Question> = sqlx::query_as(
            r#"
            SELECT question_id, round_id, position, question_text, used
            FROM questions
            WHERE round_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(round_id)
        .fetch_all(self.pool)
        .await?;

        Ok(questions)
    }

    /// Insert a round and its normalized questions in one transaction.
    pub async fn create(
        &self,
        event_id: Uuid,
        name: &str,
        round_type: &str,
        max_score: Decimal,
        question_texts: &[String],
    ) -> Result<(Round, Vec<Question>)> {
        let mut tx = self.pool.begin().await?;

        let round: Round = sqlx::query_as(
            r#"
            INSERT INTO rounds (event_id, name, round_type, max_score)
            VALUES ($1, $2, $3, $4)
            RETURNING round_id, event_id, name, round_type, max_score, created_at
            "#,
        )
        .bind(event_id)
        .bind(name)
        .bind(round_type)
        .bind(max_score)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.code().as_deref() == Some("23503") {
                    return StorageError::NotFound("event");
                }
            }
            StorageError::from(e)
        })?;

        let questions = insert_questions(&mut tx, round.round_id, question_texts).await?;

        tx.commit().await?;

        Ok((round, questions))
    }

    /// Full-field update (the service merges partial input beforehand).
    /// A supplied question list destructively replaces the old one; every
    /// surviving question starts unused.
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        round_type: &str,
        max_score: Decimal,
        question_texts: Option<&[String]>,
    ) -> Result<(Round, Vec<Question>)> {
        let mut tx = self.pool.begin().await?;

        let round: Round = sqlx::query_as(
            r#"
            UPDATE rounds
            SET name = $2, round_type = $3, max_score = $4
            WHERE round_id = $1
            RETURNING round_id, event_id, name, round_type, max_score, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(round_type)
        .bind(max_score)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound("round"))?;

        let questions = match question_texts {
            Some(texts) => {
                sqlx::query("DELETE FROM questions WHERE round_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                insert_questions(&mut tx, id, texts).await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT question_id, round_id, position, question_text, used
                    FROM questions
                    WHERE round_id = $1
                    ORDER BY position ASC
                    "#,
                )
                .bind(id)
                .fetch_all(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Ok((round, questions))
    }

    /// Delete a round. Blocked while ledger entries reference it; questions
    /// cascade with the round.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.scores_exist(id).await? {
            return Err(StorageError::Conflict(
                "round has recorded scores".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM rounds WHERE round_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("round"));
        }

        Ok(())
    }

    pub async fn scores_exist(&self, round_id: Uuid) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM scores WHERE round_id = $1)")
                .bind(round_id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }
}

async fn insert_questions(
    tx: &mut Transaction<'_, Postgres>,
    round_id: Uuid,
    texts: &[String],
) -> Result<Vec<Question>> {
    let mut questions = Vec::with_capacity(texts.len());

    for (position, text) in texts.iter().enumerate() {
        let question: Question = sqlx::query_as(
            r#"
            INSERT INTO questions (round_id, position, question_text)
            VALUES ($1, $2, $3)
            RETURNING question_id, round_id, position, question_text, used
            "#,
        )
        .bind(round_id)
        .bind(position as i32)
        .bind(text)
        .fetch_one(&mut **tx)
        .await?;

        questions.push(question);
    }

    Ok(questions)
}
