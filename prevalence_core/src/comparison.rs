use serde::Serialize;

use crate::dataset::Dataset;
use crate::disorder::{Disorder, DISORDER_COUNT};
use crate::filter::{CountryFilter, EmptySelection};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisorderProfile {
    pub country: String,
    /// Indexed by [`Disorder::index`].
    pub values: [Option<f64>; DISORDER_COUNT],
}

/// Radar-chart input: every metric for each selected country in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub year: i32,
    pub axes: [Disorder; DISORDER_COUNT],
    pub profiles: Vec<DisorderProfile>,
    /// Radial axis upper bound; `None` when no profile has a value.
    pub radial_max: Option<f64>,
}

pub fn disorder_comparison(
    dataset: &Dataset,
    countries: &[String],
    year: i32,
    when_empty: EmptySelection,
    radial_headroom: f64,
) -> ComparisonView {
    let filter = CountryFilter::new(countries, when_empty);
    let profiles: Vec<DisorderProfile> = if filter.selects_nothing() {
        Vec::new()
    } else if countries.is_empty() {
        dataset
            .rows_in_year(year)
            .map(|record| DisorderProfile {
                country: record.country_name.clone(),
                values: record.metrics,
            })
            .collect()
    } else {
        // Selection order drives trace order; countries absent this year are
        // dropped.
        countries
            .iter()
            .filter_map(|country| {
                dataset
                    .rows_in_year(year)
                    .find(|record| &record.country_name == country)
                    .map(|record| DisorderProfile {
                        country: country.clone(),
                        values: record.metrics,
                    })
            })
            .collect()
    };

    let radial_max = profiles
        .iter()
        .flat_map(|profile| profile.values.iter().flatten().copied())
        .fold(None, |max: Option<f64>, value| {
            Some(max.map_or(value, |current| current.max(value)))
        })
        .map(|max| max * radial_headroom);

    ComparisonView {
        year,
        axes: Disorder::ALL,
        profiles,
        radial_max,
    }
}
