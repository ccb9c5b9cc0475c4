//! Data module - survey CSV loading and the cached dataset

mod dataset;
mod loader;

pub use dataset::SurveyDataset;
pub use loader::{LoaderError, SurveyLoader};
