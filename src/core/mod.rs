//! Core domain types

pub mod error;
pub mod hash;
pub mod medoid;
pub mod metrics;
pub mod scored;
pub mod seed;
pub mod vector;

pub use error::{AtStage, LookalikeError, Result, Stage, StageError};
pub use hash::DatasetHash;
pub use medoid::Medoid;
pub use metrics::{ConfusionCounts, Evaluation, Metric};
pub use scored::{ClassifiedVector, Label, ScoredVector};
pub use seed::GoldenSeed;
pub use vector::{LabeledVector, RowMeta, VectorSet};
