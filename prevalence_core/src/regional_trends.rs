use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::disorder::Disorder;
use crate::region::{region_of, Region};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSeries {
    pub region: Region,
    /// `(year, mean)` ascending by year. Years where the region has no value
    /// are absent.
    pub points: Vec<(i32, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalTrendsView {
    pub disorder: Disorder,
    pub series: Vec<RegionSeries>,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

pub fn regional_trends(dataset: &Dataset, disorder: Disorder) -> RegionalTrendsView {
    let mut groups: BTreeMap<(Region, i32), Accumulator> = BTreeMap::new();
    for record in dataset.records() {
        let entry = groups
            .entry((region_of(record.code()), record.year))
            .or_default();
        if let Some(value) = record.metric(disorder) {
            entry.sum += value;
            entry.count += 1;
        }
    }

    let mut series: Vec<RegionSeries> = Vec::new();
    for ((region, year), acc) in groups {
        if acc.count == 0 {
            continue;
        }
        let point = (year, acc.sum / acc.count as f64);
        match series.last_mut() {
            Some(last) if last.region == region => last.points.push(point),
            _ => series.push(RegionSeries {
                region,
                points: vec![point],
            }),
        }
    }

    RegionalTrendsView { disorder, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn groups_by_region_and_year() {
        let dataset = Dataset::from_records(vec![
            record("France", Some("FRA"), 2019, 4.0),
            record("China", Some("CHN"), 2019, 2.0),
            record("France", Some("FRA"), 2018, 5.0),
            record("Norway", Some("NOR"), 2019, 3.0),
            record("World", None, 2019, 1.0),
        ])
        .expect("dataset");
        let view = regional_trends(&dataset, Disorder::Depression);
        let regions: Vec<_> = view.series.iter().map(|s| s.region).collect();
        assert_eq!(regions, vec![Region::Americas, Region::Europe, Region::Unknown]);
        assert_eq!(view.series[0].points, vec![(2018, 5.0), (2019, 3.0)]);
        assert_eq!(view.series[1].points, vec![(2019, 3.0)]);
        assert_eq!(view.series[2].points, vec![(2019, 1.0)]);
    }

    #[test]
    fn missing_values_leave_gaps_not_zeros() {
        let mut gap = record("Peru", Some("PER"), 2018, 0.0);
        gap.metrics[Disorder::Depression.index()] = None;
        let dataset = Dataset::from_records(vec![
            gap,
            record("Peru", Some("PER"), 2019, 3.0),
            record("Spain", Some("ESP"), 2018, 4.0),
        ])
        .expect("dataset");
        let view = regional_trends(&dataset, Disorder::Depression);
        let europe = view
            .series
            .iter()
            .find(|s| s.region == Region::Europe)
            .expect("europe series");
        assert_eq!(europe.points, vec![(2019, 3.0)]);
    }
}
