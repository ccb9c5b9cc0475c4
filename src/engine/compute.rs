//! View Computation Module
//! Filters the dataset by the selected regions and aggregates the selected
//! indicator. Stateless; runs fresh on every interaction cycle.

use polars::prelude::*;
use thiserror::Error;

use super::selection::Selection;
use crate::data::SurveyDataset;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("`{column}` is not an indicator column")]
    InvalidSelection { column: String },
    #[error("no values for `{indicator}` in the current selection")]
    EmptyAggregate { indicator: String },
    #[error("dataframe operation failed: {0}")]
    Frame(#[from] PolarsError),
}

/// One bar of the state comparison chart. A `None` value is a row whose
/// indicator cell is absent; the chart layer decides how to represent it.
#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry {
    pub region: String,
    pub value: Option<f64>,
}

/// Everything the dashboard needs for one interaction cycle.
#[derive(Debug)]
pub struct ViewResult {
    /// Rows whose region is selected, source order preserved (duplicate
    /// region rows included).
    pub filtered: DataFrame,
    /// Mean of the indicator over the filtered rows, absent values ignored
    /// in numerator and count alike.
    pub average: Result<f64, EngineError>,
    /// Region holding the maximum indicator value; the first such row in
    /// source order wins ties.
    pub max_region: Result<String, EngineError>,
    /// Cardinality of the selected region set, not of the filtered rows.
    pub region_count: usize,
    /// One entry per filtered row for the bar chart.
    pub bar_series: Vec<BarEntry>,
    /// Indicator values across the whole dataset, nulls excluded. Always
    /// national scope, independent of the region filter.
    pub distribution: Vec<f64>,
    /// Filtered rows projected to {region, round, indicator}.
    pub table: DataFrame,
}

/// Compute the dashboard view for one selection.
///
/// Pure function of its inputs. An unknown indicator fails fast; an empty
/// or all-absent selection is carried per-aggregate inside the result so
/// the remaining outputs stay usable.
pub fn compute(dataset: &SurveyDataset, selection: &Selection) -> Result<ViewResult, EngineError> {
    if !dataset.is_indicator(&selection.indicator) {
        return Err(EngineError::InvalidSelection {
            column: selection.indicator.clone(),
        });
    }

    let df = dataset.frame();
    let region_column = dataset.region_column();
    let round_column = dataset.round_column();

    let regions = df.column(&region_column)?.str()?;
    let mask: Vec<bool> = (0..df.height())
        .map(|i| {
            regions
                .get(i)
                .is_some_and(|region| selection.regions.contains(region))
        })
        .collect();
    let filtered = df.filter(&BooleanChunked::from_slice("selected".into(), &mask))?;

    let filtered_regions = filtered.column(&region_column)?.str()?;
    let values = filtered.column(&selection.indicator)?.f64()?;

    let mut bar_series = Vec::with_capacity(filtered.height());
    let mut sum = 0.0;
    let mut present = 0usize;
    let mut max: Option<(f64, String)> = None;

    for i in 0..filtered.height() {
        let region = filtered_regions.get(i).unwrap_or_default().to_string();
        let value = values.get(i);
        if let Some(v) = value {
            sum += v;
            present += 1;
            // strict comparison keeps the first row on ties
            if max.as_ref().map_or(true, |(current, _)| v > *current) {
                max = Some((v, region.clone()));
            }
        }
        bar_series.push(BarEntry { region, value });
    }

    let empty = || EngineError::EmptyAggregate {
        indicator: selection.indicator.clone(),
    };
    let average = if present > 0 {
        Ok(sum / present as f64)
    } else {
        Err(empty())
    };
    let max_region = max.map(|(_, region)| region).ok_or_else(empty);

    let distribution: Vec<f64> = df
        .column(&selection.indicator)?
        .f64()?
        .into_iter()
        .flatten()
        .collect();

    let table = filtered.select([
        region_column.as_str(),
        round_column.as_str(),
        selection.indicator.as_str(),
    ])?;

    Ok(ViewResult {
        filtered,
        average,
        max_region,
        region_count: selection.regions.len(),
        bar_series,
        distribution,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn dataset(frame: DataFrame) -> SurveyDataset {
        SurveyDataset::new(frame)
    }

    fn select(regions: &[&str], indicator: &str) -> Selection {
        Selection {
            regions: regions.iter().map(|r| r.to_string()).collect(),
            indicator: indicator.to_string(),
        }
    }

    fn three_state_dataset() -> SurveyDataset {
        dataset(
            df!(
                "STATE" => ["A", "B", "C"],
                "nfhs" => ["R1", "R1", "R1"],
                "Anemia (%)" => [Some(10.0), Some(20.0), None],
            )
            .unwrap(),
        )
    }

    #[test]
    fn aggregates_ignore_absent_values() {
        let ds = three_state_dataset();
        let view = compute(&ds, &select(&["A", "B", "C"], "Anemia (%)")).unwrap();

        assert_eq!(view.average.unwrap(), 15.0);
        assert_eq!(view.max_region.unwrap(), "B");
        assert_eq!(view.region_count, 3);
        assert_eq!(
            view.bar_series,
            vec![
                BarEntry { region: "A".into(), value: Some(10.0) },
                BarEntry { region: "B".into(), value: Some(20.0) },
                BarEntry { region: "C".into(), value: None },
            ]
        );
    }

    #[test]
    fn empty_selection_fails_aggregates_but_keeps_the_rest() {
        let ds = three_state_dataset();
        let view = compute(&ds, &select(&[], "Anemia (%)")).unwrap();

        assert!(matches!(
            view.average,
            Err(EngineError::EmptyAggregate { .. })
        ));
        assert!(matches!(
            view.max_region,
            Err(EngineError::EmptyAggregate { .. })
        ));
        assert_eq!(view.region_count, 0);
        assert_eq!(view.filtered.height(), 0);
        assert!(view.bar_series.is_empty());
        // distribution is national scope, unaffected by the filter
        assert_eq!(view.distribution, vec![10.0, 20.0]);
    }

    #[test]
    fn all_absent_selection_fails_aggregates() {
        let ds = three_state_dataset();
        let view = compute(&ds, &select(&["C"], "Anemia (%)")).unwrap();

        assert!(matches!(
            view.average,
            Err(EngineError::EmptyAggregate { .. })
        ));
        assert!(matches!(
            view.max_region,
            Err(EngineError::EmptyAggregate { .. })
        ));
        assert_eq!(view.filtered.height(), 1);
    }

    #[test]
    fn duplicate_region_rows_both_contribute() {
        let ds = dataset(
            df!(
                "STATE" => ["A", "B", "A"],
                "nfhs" => ["NFHS-4", "NFHS-4", "NFHS-5"],
                "Stunting (%)" => [Some(30.0), Some(40.0), Some(20.0)],
            )
            .unwrap(),
        );
        let view = compute(&ds, &select(&["A"], "Stunting (%)")).unwrap();

        assert_eq!(view.filtered.height(), 2);
        assert_eq!(view.average.unwrap(), 25.0);
        assert_eq!(view.region_count, 1);
        assert_eq!(
            view.bar_series,
            vec![
                BarEntry { region: "A".into(), value: Some(30.0) },
                BarEntry { region: "A".into(), value: Some(20.0) },
            ]
        );
    }

    #[test]
    fn max_ties_go_to_the_first_row_in_source_order() {
        let ds = dataset(
            df!(
                "STATE" => ["A", "B", "C"],
                "nfhs" => ["R1", "R1", "R1"],
                "Coverage (%)" => [Some(50.0), Some(80.0), Some(80.0)],
            )
            .unwrap(),
        );
        let view = compute(&ds, &select(&["A", "B", "C"], "Coverage (%)")).unwrap();

        assert_eq!(view.max_region.unwrap(), "B");
    }

    #[test]
    fn region_count_counts_the_selection_not_the_rows() {
        let ds = three_state_dataset();
        // "Z" matches no row but still counts as a selected region
        let view = compute(&ds, &select(&["A", "Z"], "Anemia (%)")).unwrap();

        assert_eq!(view.region_count, 2);
        assert_eq!(view.filtered.height(), 1);
    }

    #[test]
    fn distribution_is_unaffected_by_the_filter() {
        let ds = three_state_dataset();
        let narrow = compute(&ds, &select(&["A"], "Anemia (%)")).unwrap();
        let wide = compute(&ds, &select(&["A", "B", "C"], "Anemia (%)")).unwrap();

        assert_eq!(narrow.distribution, wide.distribution);
        assert_eq!(narrow.distribution, vec![10.0, 20.0]);
    }

    #[test]
    fn table_projects_region_round_and_indicator() {
        let ds = three_state_dataset();
        let view = compute(&ds, &select(&["A", "B"], "Anemia (%)")).unwrap();

        let names: Vec<String> = view
            .table
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["STATE", "nfhs", "Anemia (%)"]);
        assert_eq!(view.table.height(), 2);
    }

    #[test]
    fn unknown_indicator_fails_fast() {
        let ds = three_state_dataset();
        let err = compute(&ds, &select(&["A"], "STATE")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSelection { .. }));

        let err = compute(&ds, &select(&["A"], "No Such Column")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSelection { .. }));
    }

    #[test]
    fn selection_order_does_not_matter() {
        let ds = three_state_dataset();
        let mut regions = BTreeSet::new();
        regions.insert("B".to_string());
        regions.insert("A".to_string());
        let view = compute(
            &ds,
            &Selection { regions, indicator: "Anemia (%)".into() },
        )
        .unwrap();

        // filtered rows keep dataset order regardless of selection order
        assert_eq!(view.bar_series[0].region, "A");
        assert_eq!(view.bar_series[1].region, "B");
    }
}
