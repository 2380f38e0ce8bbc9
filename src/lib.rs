//! # Lookalike Library
//!
//! Medoid-based lookalike classification over behavior embeddings.
//! Picks a golden seed from a positive cohort, scores a mixed population by
//! cosine similarity to it, thresholds at a percentile of those scores, and
//! evaluates the result with a confusion matrix.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod processing;
pub mod storage;
pub mod ui;
