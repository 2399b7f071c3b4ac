use std::cmp::Ordering;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::disorder::Disorder;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCountry {
    pub country: String,
    pub code: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCountriesView {
    pub disorder: Disorder,
    pub year: i32,
    pub ranking: Vec<RankedCountry>,
}

/// Highest `limit` values for the year, descending. The sort is stable, so
/// equal values keep dataset order. Rows missing the metric are not ranked.
pub fn top_countries(
    dataset: &Dataset,
    disorder: Disorder,
    year: i32,
    limit: usize,
) -> TopCountriesView {
    let mut ranking: Vec<RankedCountry> = dataset
        .rows_in_year(year)
        .filter_map(|record| {
            record.metric(disorder).map(|value| RankedCountry {
                country: record.country_name.clone(),
                code: record.country_code.clone(),
                value,
            })
        })
        .collect();
    ranking.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    ranking.truncate(limit);

    TopCountriesView {
        disorder,
        year,
        ranking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, sample_dataset};
    use crate::world_map::world_map;

    #[test]
    fn at_most_ten_sorted_descending_subset_of_map() {
        let dataset = sample_dataset();
        for disorder in Disorder::ALL {
            let view = top_countries(&dataset, disorder, 2019, 10);
            assert!(view.ranking.len() <= 10);
            assert!(view
                .ranking
                .windows(2)
                .all(|pair| pair[0].value >= pair[1].value));

            let map = world_map(&dataset, disorder, 2019);
            for ranked in &view.ranking {
                assert!(map
                    .entries
                    .iter()
                    .any(|entry| entry.country == ranked.country
                        && entry.value == Some(ranked.value)));
            }
        }
    }

    #[test]
    fn sample_has_more_than_ten_rows_so_limit_applies() {
        let view = top_countries(&sample_dataset(), Disorder::Depression, 2019, 10);
        assert_eq!(view.ranking.len(), 10);
    }

    #[test]
    fn ties_keep_input_order() {
        let dataset = Dataset::from_records(vec![
            record("Peru", Some("PER"), 2019, 3.0),
            record("Chad", Some("TCD"), 2019, 5.0),
            record("Fiji", Some("FJI"), 2019, 3.0),
            record("Oman", Some("OMN"), 2019, 3.0),
        ])
        .expect("dataset");
        let view = top_countries(&dataset, Disorder::Depression, 2019, 3);
        let order: Vec<_> = view.ranking.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["Chad", "Peru", "Fiji"]);
    }

    #[test]
    fn missing_values_are_not_ranked() {
        let mut missing = record("Chad", Some("TCD"), 2019, 0.0);
        missing.metrics[Disorder::Depression.index()] = None;
        let dataset = Dataset::from_records(vec![missing, record("Peru", Some("PER"), 2019, 3.0)])
            .expect("dataset");
        let view = top_countries(&dataset, Disorder::Depression, 2019, 10);
        assert_eq!(view.ranking.len(), 1);
        assert_eq!(view.ranking[0].country, "Peru");
    }
}
