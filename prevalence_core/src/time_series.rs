use serde::Serialize;

use crate::dataset::Dataset;
use crate::disorder::Disorder;
use crate::filter::{CountryFilter, EmptySelection};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySeries {
    pub country: String,
    /// `(year, value)` in ascending year order; missing values are kept as
    /// gaps.
    pub points: Vec<(i32, Option<f64>)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesView {
    pub disorder: Disorder,
    pub series: Vec<CountrySeries>,
}

impl TimeSeriesView {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// One line per selected country, in selection order. Countries without any
/// row produce no line.
pub fn time_series(
    dataset: &Dataset,
    countries: &[String],
    disorder: Disorder,
    when_empty: EmptySelection,
) -> TimeSeriesView {
    let filter = CountryFilter::new(countries, when_empty);
    if filter.selects_nothing() {
        return TimeSeriesView {
            disorder,
            series: Vec::new(),
        };
    }

    let names: Vec<&str> = if countries.is_empty() {
        dataset.countries().iter().map(String::as_str).collect()
    } else {
        countries.iter().map(String::as_str).collect()
    };

    let series = names
        .into_iter()
        .filter_map(|country| {
            let mut points: Vec<(i32, Option<f64>)> = dataset
                .records()
                .iter()
                .filter(|record| record.country_name == country)
                .map(|record| (record.year, record.metric(disorder)))
                .collect();
            if points.is_empty() {
                return None;
            }
            points.sort_by_key(|(year, _)| *year);
            Some(CountrySeries {
                country: country.to_string(),
                points,
            })
        })
        .collect();

    TimeSeriesView { disorder, series }
}
