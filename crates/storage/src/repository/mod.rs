pub mod round;
pub mod score;
