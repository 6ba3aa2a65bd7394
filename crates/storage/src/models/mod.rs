pub mod question;
pub mod round;
pub mod score;

pub use question::Question;
pub use round::{Round, RoundType};
pub use score::{Score, ScoreDetail};
