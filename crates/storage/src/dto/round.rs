use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::decimal_to_f64;
use crate::models::{Question, Round, RoundType};

/// Request payload for creating a new round
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRoundRequest {
    pub event_id: Uuid,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(custom(function = "validate_round_type"))]
    pub round_type: String,

    #[validate(range(exclusive_min = 0.0, message = "max_score must be a positive number"))]
    pub max_score: f64,

    pub questions: Option<QuestionsInput>,
}

/// Request payload for updating an existing round. Only supplied fields
/// change; a supplied `questions` value replaces the whole list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRoundRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_round_type"))]
    pub round_type: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "max_score must be a positive number"))]
    pub max_score: Option<f64>,

    pub questions: Option<QuestionsInput>,
}

/// Accepted shapes for the `questions` field: a single prompt, a list of
/// prompts, or a list of question objects. Everything is normalized into
/// ordered unused questions; incoming `used` flags are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QuestionsInput {
    Single(String),
    Many(Vec<QuestionEntry>),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QuestionEntry {
    Text(String),
    Detailed { question_text: String },
}

/// Normalize the union input into the canonical ordered prompt list.
pub fn normalize_questions(input: Option<&QuestionsInput>) -> Result<Vec<String>, String> {
    let entries: Vec<&str> = match input {
        None => return Ok(Vec::new()),
        Some(QuestionsInput::Single(text)) => vec![text.as_str()],
        Some(QuestionsInput::Many(entries)) => entries
            .iter()
            .map(|entry| match entry {
                QuestionEntry::Text(text) => text.as_str(),
                QuestionEntry::Detailed { question_text } => question_text.as_str(),
            })
            .collect(),
    };

    let mut questions = Vec::with_capacity(entries.len());
    for text in entries {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err("question text must not be empty".to_string());
        }
        questions.push(trimmed.to_string());
    }

    Ok(questions)
}

/// Response containing a round and its ordered question list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoundResponse {
    pub round_id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub round_type: String,
    pub max_score: f64,
    pub questions: Vec<QuestionResponse>,
    pub created_at: chrono::NaiveDateTime,
}

impl RoundResponse {
    pub fn from_parts(round: Round, questions: Vec<Question>) -> Self {
        Self {
            round_id: round.round_id,
            event_id: round.event_id,
            name: round.name,
            round_type: round.round_type,
            max_score: decimal_to_f64(round.max_score),
            questions: questions.into_iter().map(QuestionResponse::from).collect(),
            created_at: round.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionResponse {
    pub question_id: Uuid,
    pub position: i32,
    pub question_text: String,
    pub used: bool,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            question_id: question.question_id,
            position: question.position,
            question_text: question.question_text,
            used: question.used,
        }
    }
}

/// List entry joined with event identity for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoundListEntry {
    pub round_id: Uuid,
    pub event: EventInfo,
    pub name: String,
    pub round_type: String,
    pub max_score: f64,
    pub question_count: i64,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventInfo {
    pub event_id: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EventFilter {
    pub event_id: Option<Uuid>,
}

fn validate_round_type(round_type: &str) -> Result<(), validator::ValidationError> {
    if RoundType::parse(round_type).is_some() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_round_type"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_questions_normalize_to_empty() {
        assert_eq!(normalize_questions(None).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn single_string_becomes_one_question() {
        let input = QuestionsInput::Single("What is your talent?".to_string());
        let questions = normalize_questions(Some(&input)).unwrap();
        assert_eq!(questions, vec!["What is your talent?".to_string()]);
    }

    #[test]
    fn string_array_keeps_order() {
        let input = QuestionsInput::Many(vec![
            QuestionEntry::Text("Q1".to_string()),
            QuestionEntry::Text("Q2".to_string()),
        ]);
        let questions = normalize_questions(Some(&input)).unwrap();
        assert_eq!(questions, vec!["Q1".to_string(), "Q2".to_string()]);
    }

    #[test]
    fn object_entries_use_question_text() {
        let input = QuestionsInput::Many(vec![
            QuestionEntry::Detailed {
                question_text: "Why judging?".to_string(),
            },
            QuestionEntry::Text("Q2".to_string()),
        ]);
        let questions = normalize_questions(Some(&input)).unwrap();
        assert_eq!(questions, vec!["Why judging?".to_string(), "Q2".to_string()]);
    }

    #[test]
    fn empty_text_is_rejected() {
        let input = QuestionsInput::Single("   ".to_string());
        assert!(normalize_questions(Some(&input)).is_err());

        let input = QuestionsInput::Many(vec![
            QuestionEntry::Text("Q1".to_string()),
            QuestionEntry::Text(String::new()),
        ]);
        assert!(normalize_questions(Some(&input)).is_err());
    }

    #[test]
    fn incoming_used_flag_is_ignored_by_deserialization() {
        let raw = r#"[{"question_text": "Q1", "used": true}, "Q2"]"#;
        let input: QuestionsInput = serde_json::from_str(raw).unwrap();
        let questions = normalize_questions(Some(&input)).unwrap();
        assert_eq!(questions, vec!["Q1".to_string(), "Q2".to_string()]);
    }

    #[test]
    fn rejects_non_union_input() {
        assert!(serde_json::from_str::<QuestionsInput>("42").is_err());
        assert!(serde_json::from_str::<QuestionsInput>(r#"{"foo": 1}"#).is_err());
    }
}
