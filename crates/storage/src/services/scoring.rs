use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Question, Round, RoundType};

/// Validate a judge's submission against the round's rules.
///
/// Runs before any mutation: every failure path leaves the round and the
/// ledger untouched. For qna rounds the resolved question is returned so
/// the commit step can target its used-flag and snapshot its text.
///
/// The used-flag check here covers the sequential case; the authoritative
/// guard against concurrent submissions is the conditional update in
/// `ScoreRepository::submit`.
pub fn validate_submission<'a>(
    round: &Round,
    questions: &'a [Question],
    score: Decimal,
    question_id: Option<Uuid>,
) -> Result<Option<&'a Question>> {
    if score < Decimal::ZERO {
        return Err(StorageError::Validation(
            "score must be non-negative".to_string(),
        ));
    }

    if score > round.max_score {
        return Err(StorageError::Validation(format!(
            "score exceeds round maximum of {}",
            round.max_score
        )));
    }

    match round.kind() {
        RoundType::Normal => {
            if question_id.is_some() {
                return Err(StorageError::Validation(
                    "question does not apply to this round type".to_string(),
                ));
            }
            Ok(None)
        }
        RoundType::Qna => {
            let question_id = question_id.ok_or_else(|| {
                StorageError::Validation("question is required for this round".to_string())
            })?;

            let question = questions
                .iter()
                .find(|q| q.question_id == question_id)
                .ok_or(StorageError::NotFound("question"))?;

            if question.used {
                return Err(StorageError::Conflict("question already used".to_string()));
            }

            Ok(Some(question))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(round_type: &str, max_score: i64) -> Round {
        Round {
            round_id: Uuid::from_u128(1),
            event_id: Uuid::from_u128(2),
            name: "Talent".to_string(),
            round_type: round_type.to_string(),
            max_score: Decimal::from(max_score),
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    fn question(id: u128, used: bool) -> Question {
        Question {
            question_id: Uuid::from_u128(id),
            round_id: Uuid::from_u128(1),
            position: 0,
            question_text: format!("Q{id}"),
            used,
        }
    }

    #[test]
    fn accepts_in_range_score_for_normal_round() {
        let result = validate_submission(&round("normal", 10), &[], Decimal::from(8), None);
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn rejects_score_above_ceiling() {
        let result = validate_submission(&round("normal", 10), &[], Decimal::from(15), None);
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[test]
    fn accepts_score_equal_to_ceiling() {
        let result = validate_submission(&round("normal", 10), &[], Decimal::from(10), None);
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_negative_score() {
        let result = validate_submission(&round("normal", 10), &[], Decimal::from(-1), None);
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[test]
    fn normal_round_rejects_question_reference() {
        let result = validate_submission(
            &round("normal", 10),
            &[],
            Decimal::from(5),
            Some(Uuid::from_u128(10)),
        );
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[test]
    fn qna_round_requires_question() {
        let questions = [question(10, false)];
        let result = validate_submission(&round("qna", 10), &questions, Decimal::from(5), None);
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[test]
    fn qna_round_rejects_unknown_question() {
        let questions = [question(10, false)];
        let result = validate_submission(
            &round("qna", 10),
            &questions,
            Decimal::from(5),
            Some(Uuid::from_u128(99)),
        );
        assert!(matches!(result, Err(StorageError::NotFound("question"))));
    }

    #[test]
    fn qna_round_rejects_used_question() {
        let questions = [question(10, true)];
        let result = validate_submission(
            &round("qna", 10),
            &questions,
            Decimal::from(5),
            Some(Uuid::from_u128(10)),
        );
        assert!(matches!(result, Err(StorageError::Conflict(_))));
    }

    #[test]
    fn qna_round_resolves_unused_question() {
        let questions = [question(10, true), question(11, false)];
        let resolved = validate_submission(
            &round("qna", 10),
            &questions,
            Decimal::from(8),
            Some(Uuid::from_u128(11)),
        )
        .unwrap()
        .expect("question resolved");

        assert_eq!(resolved.question_id, Uuid::from_u128(11));
        assert_eq!(resolved.question_text, "Q11");
    }

    #[test]
    fn validation_happens_before_question_resolution() {
        // Over-ceiling submission against a used question reports the range
        // problem, not the conflict.
        let questions = [question(10, true)];
        let result = validate_submission(
            &round("qna", 10),
            &questions,
            Decimal::from(50),
            Some(Uuid::from_u128(10)),
        );
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }
}
