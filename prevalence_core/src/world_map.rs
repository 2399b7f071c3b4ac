use serde::Serialize;

use crate::dataset::Dataset;
use crate::disorder::Disorder;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub country: String,
    pub code: Option<String>,
    pub value: Option<f64>,
}

/// Choropleth input: one entry per row of the selected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldMapView {
    pub disorder: Disorder,
    pub year: i32,
    pub entries: Vec<MapEntry>,
}

impl WorldMapView {
    /// Entries that can be placed on a map. Rows without a country code stay
    /// in `entries` but are never drawn.
    pub fn renderable(&self) -> impl Iterator<Item = &MapEntry> + '_ {
        self.entries.iter().filter(|entry| entry.code.is_some())
    }

    /// Colour-scale bounds over the drawable values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.renderable()
            .filter_map(|entry| entry.value)
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((low, high)) => Some((f64::min(low, value), f64::max(high, value))),
            })
    }
}

pub fn world_map(dataset: &Dataset, disorder: Disorder, year: i32) -> WorldMapView {
    let entries = dataset
        .rows_in_year(year)
        .map(|record| MapEntry {
            country: record.country_name.clone(),
            code: record.country_code.clone(),
            value: record.metric(disorder),
        })
        .collect();
    WorldMapView {
        disorder,
        year,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, sample_dataset};

    #[test]
    fn only_rows_of_the_selected_year() {
        let dataset = sample_dataset();
        for year in dataset.years() {
            let view = world_map(&dataset, Disorder::Depression, year);
            let expected = dataset.rows_in_year(year).count();
            assert_eq!(view.entries.len(), expected);
            for entry in &view.entries {
                assert!(dataset
                    .rows_in_year(year)
                    .any(|r| r.country_name == entry.country));
            }
        }
    }

    #[test]
    fn rows_without_code_are_not_renderable() {
        let dataset = Dataset::from_records(vec![
            record("France", Some("FRA"), 2019, 4.5),
            record("World", None, 2019, 3.4),
        ])
        .expect("dataset");
        let view = world_map(&dataset, Disorder::Depression, 2019);
        assert_eq!(view.entries.len(), 2);
        let drawn: Vec<_> = view.renderable().map(|e| e.country.as_str()).collect();
        assert_eq!(drawn, vec!["France"]);
        assert_eq!(view.value_range(), Some((4.5, 4.5)));
    }

    #[test]
    fn unknown_year_is_empty() {
        let view = world_map(&sample_dataset(), Disorder::Depression, 1800);
        assert!(view.entries.is_empty());
        assert_eq!(view.value_range(), None);
    }
}
