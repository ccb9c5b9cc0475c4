//! Selection state supplied by the presentation layer for one cycle.

use std::collections::BTreeSet;

use crate::data::SurveyDataset;

/// One interaction cycle's worth of user choices: which regions to keep
/// and which indicator column to aggregate. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub regions: BTreeSet<String>,
    pub indicator: String,
}

impl Selection {
    /// The presentation defaults: first five regions in source order and
    /// the first indicator column.
    pub fn default_for(dataset: &SurveyDataset) -> Self {
        Self {
            regions: dataset.regions().into_iter().take(5).collect(),
            indicator: dataset.indicators().first().cloned().unwrap_or_default(),
        }
    }
}
