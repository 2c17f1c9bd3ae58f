// Murmur: topic sentiment analysis for Twitter
//
// This is the library root. Each module corresponds to a stage of the
// collect -> normalize -> classify -> report pipeline.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod sentiment;
pub mod text;
pub mod twitter;
