//! Survey Dataset Module
//! Wraps the loaded DataFrame with the positional column contract.

use polars::prelude::*;
use std::collections::BTreeSet;

/// Indicator columns start after the identifier and survey-round columns.
const FIRST_INDICATOR_IDX: usize = 2;

/// The loaded survey table.
///
/// Column contract, by position: column 0 is the region identifier, column 1
/// the survey-round label, and every later column a `Float64` health
/// indicator with nulls for absent values.
#[derive(Debug, Clone)]
pub struct SurveyDataset {
    df: DataFrame,
}

impl SurveyDataset {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// The underlying DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Number of rows in the dataset.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Header name of the region identifier column.
    pub fn region_column(&self) -> String {
        self.column_name(0)
    }

    /// Header name of the survey-round column.
    pub fn round_column(&self) -> String {
        self.column_name(1)
    }

    fn column_name(&self, idx: usize) -> String {
        self.df
            .get_column_names()
            .get(idx)
            .map(|name| name.to_string())
            .unwrap_or_default()
    }

    /// Distinct region values in first-occurrence source order.
    ///
    /// Source order matters: the sidebar's default selection is the first
    /// five regions as they appear in the file. Duplicate rows (one per
    /// survey round) collapse to a single entry here.
    pub fn regions(&self) -> Vec<String> {
        let Ok(column) = self.df.column(&self.region_column()) else {
            return Vec::new();
        };
        let Ok(values) = column.str() else {
            return Vec::new();
        };

        let mut seen = BTreeSet::new();
        let mut regions = Vec::new();
        for value in values.into_iter().flatten() {
            if seen.insert(value) {
                regions.push(value.to_string());
            }
        }
        regions
    }

    /// Indicator column names, i.e. everything after the two metadata
    /// columns.
    pub fn indicators(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .skip(FIRST_INDICATOR_IDX)
            .map(|name| name.to_string())
            .collect()
    }

    /// Whether `name` is a legal indicator selection.
    pub fn is_indicator(&self, name: &str) -> bool {
        self.indicators().iter().any(|column| column == name)
    }
}
