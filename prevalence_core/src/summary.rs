use serde::Serialize;
use thiserror::Error;

use crate::dataset::Dataset;
use crate::disorder::Disorder;
use crate::stats::mean;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ViewError {
    #[error("no {disorder} values recorded for {year}")]
    NoData { disorder: Disorder, year: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extreme {
    pub country: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub disorder: Disorder,
    pub year: i32,
    pub mean: f64,
    pub max: Extreme,
    pub min: Extreme,
    /// Rows that contributed a value.
    pub samples: usize,
}

/// Mean, maximum and minimum for the year. On equal extremes the first row
/// in dataset order wins.
pub fn summary_stats(
    dataset: &Dataset,
    disorder: Disorder,
    year: i32,
) -> Result<SummaryStats, ViewError> {
    let values: Vec<(&str, f64)> = dataset
        .rows_in_year(year)
        .filter_map(|record| {
            record
                .metric(disorder)
                .map(|value| (record.country_name.as_str(), value))
        })
        .collect();

    let no_data = || ViewError::NoData { disorder, year };
    let average = mean(values.iter().map(|(_, value)| Some(*value))).ok_or_else(no_data)?;

    let mut max = values.first().copied().ok_or_else(no_data)?;
    let mut min = max;
    for &(country, value) in values.iter().skip(1) {
        if value > max.1 {
            max = (country, value);
        }
        if value < min.1 {
            min = (country, value);
        }
    }

    Ok(SummaryStats {
        disorder,
        year,
        mean: average,
        max: Extreme {
            country: max.0.to_string(),
            value: max.1,
        },
        min: Extreme {
            country: min.0.to_string(),
            value: min.1,
        },
        samples: values.len(),
    })
}
