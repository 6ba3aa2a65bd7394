pub mod rounds;
pub mod scores;
