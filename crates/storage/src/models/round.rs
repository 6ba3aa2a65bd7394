use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Round {
    pub round_id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub round_type: String,
    pub max_score: Decimal,
    pub created_at: chrono::NaiveDateTime,
}

impl Round {
    /// The type column is constrained in the database, so an unparseable
    /// value only occurs on manual tampering.
    pub fn kind(&self) -> RoundType {
        RoundType::parse(&self.round_type).unwrap_or(RoundType::Normal)
    }
}

/// Round behaviour selector: plain numeric rounds vs question-and-answer
/// rounds with single-use questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundType {
    Normal,
    Qna,
}

impl RoundType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "qna" => Some(Self::Qna),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Qna => "qna",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types() {
        assert_eq!(RoundType::parse("normal"), Some(RoundType::Normal));
        assert_eq!(RoundType::parse("qna"), Some(RoundType::Qna));
    }

    #[test]
    fn rejects_unknown_types() {
        assert_eq!(RoundType::parse("QnA"), None);
        assert_eq!(RoundType::parse("speech"), None);
        assert_eq!(RoundType::parse(""), None);
    }

    #[test]
    fn round_trips_as_str() {
        for t in [RoundType::Normal, RoundType::Qna] {
            assert_eq!(RoundType::parse(t.as_str()), Some(t));
        }
    }
}
