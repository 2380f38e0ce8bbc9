//! Dataset, seed and export persistence

pub mod dataset;
pub mod export;
pub mod seed;

pub use dataset::{DatasetFile, LoadedDataset};
pub use export::Export;
