//! # Command Implementations
//!
//! Each submodule handles one CLI command (run, score, centers).

pub mod centers;
pub mod run;
pub mod score;
