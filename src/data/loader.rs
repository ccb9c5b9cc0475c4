//! Survey Loader Module
//! Reads and cleans the survey CSV with Polars, behind a process-lifetime
//! cache.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use super::dataset::SurveyDataset;

/// Exact missing-value token used by the survey source.
const MISSING_SENTINEL: &str = "NA";

/// Number of leading columns (identifier, survey round) kept as strings.
const METADATA_COLUMNS: usize = 2;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to read survey data: {0}")]
    SourceRead(#[from] PolarsError),
}

/// Loads the survey CSV once and serves the cached dataset afterwards.
///
/// The cache slot is populated while the mutex is held, so concurrent
/// callers trigger at most one read of the source; after that the slot is
/// only ever cloned out and the dataset is effectively immutable.
pub struct SurveyLoader {
    path: PathBuf,
    cache: Mutex<Option<Arc<SurveyDataset>>>,
}

impl SurveyLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: Mutex::new(None),
        }
    }

    /// Return the cached dataset, reading the source on the first call.
    pub fn load(&self) -> Result<Arc<SurveyDataset>, LoaderError> {
        let mut slot = self.cache.lock().expect("dataset cache poisoned");
        if let Some(dataset) = slot.as_ref() {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(read_survey_csv(&self.path)?);
        log::info!(
            "loaded {} rows and {} indicators from {}",
            dataset.height(),
            dataset.indicators().len(),
            self.path.display()
        );
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset so the next [`load`](Self::load) re-reads
    /// the source. Nothing in the UI calls this today.
    #[allow(dead_code)]
    pub fn invalidate(&self) {
        self.cache.lock().expect("dataset cache poisoned").take();
    }
}

/// Read and clean the survey table.
///
/// Every column comes in as a string with the exact `"NA"` token parsed as
/// null across the whole table; columns after the two metadata columns are
/// then cast to `Float64` non-strictly, so cells that fail numeric coercion
/// become null instead of failing the load.
fn read_survey_csv(path: &Path) -> Result<SurveyDataset, LoaderError> {
    let mut df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(0))
        .with_null_values(Some(NullValues::AllColumnsSingle(MISSING_SENTINEL.into())))
        .finish()?
        .collect()?;

    let indicator_names: Vec<String> = df
        .get_column_names()
        .iter()
        .skip(METADATA_COLUMNS)
        .map(|name| name.to_string())
        .collect();

    for name in &indicator_names {
        let coerced = df.column(name)?.cast(&DataType::Float64)?;
        df.with_column(coerced)?;
    }

    Ok(SurveyDataset::new(df))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "\
STATE,nfhs,Sex Ratio,Literacy (%)
Kerala,NFHS-5,1084,96.2
Goa,NFHS-5,NA,92.8
Bihar,NFHS-5,1090,not reported
";

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "nfhs_explorer_{}_{}.csv",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn sentinel_cells_load_as_null() {
        let path = temp_csv("sentinel", SAMPLE);
        let dataset = SurveyLoader::new(&path).load().unwrap();

        let sex_ratio = dataset.frame().column("Sex Ratio").unwrap().f64().unwrap();
        assert_eq!(sex_ratio.get(0), Some(1084.0));
        assert_eq!(sex_ratio.get(1), None);
        assert_eq!(sex_ratio.get(2), Some(1090.0));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn coercion_failures_load_as_null() {
        let path = temp_csv("coercion", SAMPLE);
        let dataset = SurveyLoader::new(&path).load().unwrap();

        let literacy = dataset
            .frame()
            .column("Literacy (%)")
            .unwrap()
            .f64()
            .unwrap();
        assert_eq!(literacy.get(0), Some(96.2));
        // "not reported" is neither numeric nor the sentinel
        assert_eq!(literacy.get(2), None);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn metadata_columns_stay_strings() {
        let path = temp_csv("metadata", SAMPLE);
        let dataset = SurveyLoader::new(&path).load().unwrap();

        let frame = dataset.frame();
        assert_eq!(frame.column("STATE").unwrap().dtype(), &DataType::String);
        assert_eq!(frame.column("nfhs").unwrap().dtype(), &DataType::String);
        assert_eq!(
            frame.column("Sex Ratio").unwrap().dtype(),
            &DataType::Float64
        );

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn repeated_loads_hit_the_cache() {
        let path = temp_csv("cache", SAMPLE);
        let loader = SurveyLoader::new(&path);

        let first = loader.load().unwrap();
        let second = loader.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn invalidate_forces_a_reread() {
        let path = temp_csv("invalidate", SAMPLE);
        let loader = SurveyLoader::new(&path);

        let before = loader.load().unwrap();
        assert_eq!(before.height(), 3);

        let mut grown = SAMPLE.to_string();
        grown.push_str("Punjab,NFHS-5,938,83.7\n");
        fs::write(&path, grown).unwrap();

        // The cache still serves the old dataset until invalidated.
        assert_eq!(loader.load().unwrap().height(), 3);

        loader.invalidate();
        let after = loader.load().unwrap();
        assert_eq!(after.height(), 4);
        assert!(!Arc::ptr_eq(&before, &after));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_source_is_an_error() {
        let loader = SurveyLoader::new("/nonexistent/nfhs.csv");
        assert!(matches!(loader.load(), Err(LoaderError::SourceRead(_))));
    }
}
