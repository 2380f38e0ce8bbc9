//! Medoid selection, scoring, thresholding and evaluation

pub mod centers;
pub mod evaluate;
pub mod medoid;
pub mod partition;
pub mod pipeline;
pub mod similarity;
pub mod threshold;

pub use centers::{center_distribution, CenterDistribution};
pub use evaluate::evaluate;
pub use medoid::find_medoid;
pub use partition::{split, Split};
pub use pipeline::{run, RunReport};
pub use similarity::{cosine_similarity, DistanceMetric, SimilarityScorer};
pub use threshold::{classify, percentile, Classification};
