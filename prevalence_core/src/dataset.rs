use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::disorder::{Disorder, DISORDER_COUNT};

pub const ENTITY_COLUMN: &str = "Entity";
pub const CODE_COLUMN: &str = "Code";
pub const YEAR_COLUMN: &str = "Year";

/// One country-year row of the prevalence table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub country_name: String,
    pub country_code: Option<String>,
    pub year: i32,
    pub metrics: [Option<f64>; DISORDER_COUNT],
}

impl Record {
    pub fn new(
        country_name: impl Into<String>,
        country_code: Option<&str>,
        year: i32,
        metrics: [Option<f64>; DISORDER_COUNT],
    ) -> Self {
        Self {
            country_name: country_name.into(),
            country_code: country_code
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string),
            year,
            metrics,
        }
    }

    pub fn metric(&self, disorder: Disorder) -> Option<f64> {
        self.metrics[disorder.index()]
    }

    pub fn code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }
}

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open dataset {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read dataset CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    #[error("invalid value {value:?} in column '{column}' at line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
    #[error("dataset contains no rows")]
    Empty,
}

/// Immutable in-memory prevalence table. Row order is the input order.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    year_range: (i32, i32),
    countries: Vec<String>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let file = File::open(path).map_err(|source| DataLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            countries = dataset.countries.len(),
            first_year = dataset.year_range.0,
            last_year = dataset.year_range.1,
            "dataset.loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let layout = ColumnLayout::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(layout.parse_row(&row)?);
        }
        debug!(rows = records.len(), "dataset.parsed");
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<Record>) -> Result<Self, DataLoadError> {
        let first_year = records.iter().map(|r| r.year).min();
        let last_year = records.iter().map(|r| r.year).max();
        let (Some(first_year), Some(last_year)) = (first_year, last_year) else {
            return Err(DataLoadError::Empty);
        };
        let countries = records
            .iter()
            .map(|record| record.country_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Ok(Self {
            records,
            year_range: (first_year, last_year),
            countries,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inclusive (min, max) of observed years.
    pub fn year_range(&self) -> (i32, i32) {
        self.year_range
    }

    pub fn clamp_year(&self, year: i32) -> i32 {
        year.clamp(self.year_range.0, self.year_range.1)
    }

    /// Sorted unique country names.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn has_country(&self, name: &str) -> bool {
        self.countries
            .binary_search_by(|candidate| candidate.as_str().cmp(name))
            .is_ok()
    }

    /// Sorted unique years that have at least one row.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|record| record.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Year-selector labels: `min, min + step, ...` up to `max`.
    pub fn year_marks(&self, step: u32) -> Vec<i32> {
        let (first, last) = self.year_range;
        let step = step.max(1) as usize;
        (first..=last).step_by(step).collect()
    }

    pub fn rows_in_year(&self, year: i32) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter().filter(move |record| record.year == year)
    }
}

struct ColumnLayout {
    entity: usize,
    code: usize,
    year: usize,
    metrics: [usize; DISORDER_COUNT],
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataLoadError> {
        let mut missing = Vec::new();
        let mut position = |name: &str| {
            let found = headers.iter().position(|header| header == name);
            if found.is_none() {
                missing.push(name.to_string());
            }
            found.unwrap_or(usize::MAX)
        };

        let entity = position(ENTITY_COLUMN);
        let code = position(CODE_COLUMN);
        let year = position(YEAR_COLUMN);
        let mut metrics = [usize::MAX; DISORDER_COUNT];
        for disorder in Disorder::ALL {
            metrics[disorder.index()] = position(disorder.column());
        }

        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns { columns: missing });
        }
        Ok(Self {
            entity,
            code,
            year,
            metrics,
        })
    }

    fn parse_row(&self, row: &csv::StringRecord) -> Result<Record, DataLoadError> {
        let line = row.position().map(|pos| pos.line()).unwrap_or(0);
        let cell = |index: usize| row.get(index).unwrap_or("");
        let invalid = |column: &str, value: &str| DataLoadError::InvalidValue {
            line,
            column: column.to_string(),
            value: value.to_string(),
        };

        let entity = cell(self.entity);
        if entity.is_empty() {
            return Err(invalid(ENTITY_COLUMN, entity));
        }

        let raw_year = cell(self.year);
        let year = parse_year(raw_year).ok_or_else(|| invalid(YEAR_COLUMN, raw_year))?;

        let mut metrics = [None; DISORDER_COUNT];
        for disorder in Disorder::ALL {
            let raw = cell(self.metrics[disorder.index()]);
            metrics[disorder.index()] =
                parse_metric(raw).ok_or_else(|| invalid(disorder.column(), raw))?;
        }

        Ok(Record::new(entity, Some(cell(self.code)), year, metrics))
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}

/// `Some(None)` for a missing value, `None` for anything that is not a
/// percentage.
fn parse_metric(raw: &str) -> Option<Option<f64>> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Some(None);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && (0.0..=100.0).contains(&value)).then_some(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Entity,Code,Year,Schizophrenia (%),Bipolar disorder (%),Eating disorders (%),Anxiety disorders (%),Drug use disorders (%),Depression (%),Alcohol use disorders (%)";

    fn csv(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn parses_rows_in_input_order() {
        let text = csv(&[
            "France,FRA,2019,0.2,0.9,0.3,6.5,0.8,4.5,1.4",
            "World,,2019.0,0.3,0.6,0.2,4.0,0.9,3.4,1.5",
        ]);
        let dataset = Dataset::from_reader(text.as_bytes()).expect("dataset parses");
        assert_eq!(dataset.len(), 2);
        let france = &dataset.records()[0];
        assert_eq!(france.country_name, "France");
        assert_eq!(france.code(), Some("FRA"));
        assert_eq!(france.metric(Disorder::Depression), Some(4.5));
        let world = &dataset.records()[1];
        assert_eq!(world.code(), None);
        assert_eq!(world.year, 2019);
    }

    #[test]
    fn blank_and_nan_cells_are_missing() {
        let text = csv(&["Chad,TCD,2001,,NaN,0.1,3.0,0.5,2.9,0.7"]);
        let dataset = Dataset::from_reader(text.as_bytes()).expect("dataset parses");
        let chad = &dataset.records()[0];
        assert_eq!(chad.metric(Disorder::Schizophrenia), None);
        assert_eq!(chad.metric(Disorder::BipolarDisorder), None);
        assert_eq!(chad.metric(Disorder::EatingDisorders), Some(0.1));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let text = "index,Entity,Code,Year,Schizophrenia (%),Bipolar disorder (%),Eating disorders (%),Anxiety disorders (%),Drug use disorders (%),Depression (%),Alcohol use disorders (%)\n0,Peru,PER,1990,0.2,0.7,0.2,3.1,0.4,3.0,1.2";
        let dataset = Dataset::from_reader(text.as_bytes()).expect("dataset parses");
        assert_eq!(dataset.records()[0].country_name, "Peru");
    }

    #[test]
    fn reports_every_missing_column() {
        let text = "Entity,Year,Depression (%)\nFrance,2019,4.5";
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        match err {
            DataLoadError::MissingColumns { columns } => {
                assert!(columns.contains(&"Code".to_string()));
                assert!(columns.contains(&"Schizophrenia (%)".to_string()));
                assert!(!columns.contains(&"Depression (%)".to_string()));
                assert_eq!(columns.len(), 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_out_of_range_metric() {
        let text = csv(&["France,FRA,2019,0.2,0.9,0.3,6.5,0.8,140,1.4"]);
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        match err {
            DataLoadError::InvalidValue { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "Depression (%)");
                assert_eq!(value, "140");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn metric_cells_classify() {
        assert_eq!(parse_metric("4.5"), Some(Some(4.5)));
        assert_eq!(parse_metric("0"), Some(Some(0.0)));
        assert_eq!(parse_metric(""), Some(None));
        assert_eq!(parse_metric("NaN"), Some(None));
        assert_eq!(parse_metric("-0.1"), None);
        assert_eq!(parse_metric("100.5"), None);
        assert_eq!(parse_metric("inf"), None);
        assert_eq!(parse_metric("high"), None);
    }

    #[test]
    fn rejects_fractional_year() {
        let text = csv(&["France,FRA,2019.5,0.2,0.9,0.3,6.5,0.8,4.5,1.4"]);
        assert!(matches!(
            Dataset::from_reader(text.as_bytes()),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn header_only_file_is_empty() {
        assert!(matches!(
            Dataset::from_reader(HEADER.as_bytes()),
            Err(DataLoadError::Empty)
        ));
    }

    #[test]
    fn metadata_tracks_years_and_countries() {
        let text = csv(&[
            "Peru,PER,1990,0.2,0.7,0.2,3.1,0.4,3.0,1.2",
            "Chad,TCD,2001,0.2,0.7,0.1,3.0,0.5,2.9,0.7",
            "Peru,PER,2001,0.2,0.7,0.2,3.2,0.4,3.1,1.2",
        ]);
        let dataset = Dataset::from_reader(text.as_bytes()).expect("dataset parses");
        assert_eq!(dataset.year_range(), (1990, 2001));
        assert_eq!(dataset.years(), vec![1990, 2001]);
        assert_eq!(dataset.countries(), ["Chad".to_string(), "Peru".to_string()]);
        assert!(dataset.has_country("Peru"));
        assert!(!dataset.has_country("France"));
        assert_eq!(dataset.year_marks(5), vec![1990, 1995, 2000]);
        assert_eq!(dataset.clamp_year(2050), 2001);
    }
}
