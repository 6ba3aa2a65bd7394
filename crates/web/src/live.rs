//! Process-owned publish/subscribe channel for newly recorded scores.
//!
//! Publishing is fire-and-forget: delivery problems (no subscribers, lagged
//! subscribers) never fail the score submission that triggered the event.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use utoipa::ToSchema;
use uuid::Uuid;

const DEFAULT_FEED_CAPACITY: usize = 256;

/// Event emitted after each successful score submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScorePosted {
    pub score_id: Uuid,
    pub round_id: Uuid,
    pub contestant_id: Uuid,
    pub judge_id: Uuid,
    pub score: f64,
}

#[derive(Clone)]
pub struct ScoreFeed {
    sender: broadcast::Sender<ScorePosted>,
}

impl ScoreFeed {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FEED_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Broadcast an event to all live subscribers. Returns how many
    /// received it; zero subscribers is not an error.
    pub fn publish(&self, event: ScorePosted) -> usize {
        match self.sender.send(event) {
            Ok(subscribers) => subscribers,
            Err(_) => {
                tracing::debug!("score event dropped, no live subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScorePosted> {
        self.sender.subscribe()
    }
}

impl Default for ScoreFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(score: f64) -> ScorePosted {
        ScorePosted {
            score_id: Uuid::from_u128(1),
            round_id: Uuid::from_u128(2),
            contestant_id: Uuid::from_u128(3),
            judge_id: Uuid::from_u128(4),
            score,
        }
    }

    #[tokio::test]
    async fn delivers_to_live_subscriber() {
        let feed = ScoreFeed::new();
        let mut rx = feed.subscribe();

        let delivered = feed.publish(event(8.0));
        assert_eq!(delivered, 1);
        assert_eq!(rx.recv().await.unwrap(), event(8.0));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_non_fatal() {
        let feed = ScoreFeed::new();
        assert_eq!(feed.publish(event(5.0)), 0);
    }

    #[tokio::test]
    async fn each_subscriber_gets_every_event() {
        let feed = ScoreFeed::new();
        let mut a = feed.subscribe();
        let mut b = feed.subscribe();

        assert_eq!(feed.publish(event(7.0)), 2);

        assert_eq!(a.recv().await.unwrap().score, 7.0);
        assert_eq!(b.recv().await.unwrap().score, 7.0);
    }
}
