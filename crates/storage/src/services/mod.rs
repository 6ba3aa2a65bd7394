pub mod aggregation;
pub mod scoring;
