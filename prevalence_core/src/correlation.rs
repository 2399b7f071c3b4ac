use serde::Serialize;

use crate::dataset::Dataset;
use crate::disorder::{Disorder, DISORDER_COUNT};
use crate::stats::pearson;

/// Pairwise Pearson coefficients between all metrics for one year.
///
/// Cells are NaN where a coefficient is undefined (serialized as `null`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationView {
    pub year: i32,
    pub axes: [Disorder; DISORDER_COUNT],
    pub matrix: [[f64; DISORDER_COUNT]; DISORDER_COUNT],
}

impl CorrelationView {
    pub fn get(&self, row: Disorder, column: Disorder) -> f64 {
        self.matrix[row.index()][column.index()]
    }
}

pub fn correlation_heatmap(dataset: &Dataset, year: i32) -> CorrelationView {
    let rows: Vec<_> = dataset.rows_in_year(year).map(|record| record.metrics).collect();
    let mut matrix = [[f64::NAN; DISORDER_COUNT]; DISORDER_COUNT];

    for i in 0..DISORDER_COUNT {
        for j in i..DISORDER_COUNT {
            let pairs: Vec<_> = rows.iter().map(|metrics| (metrics[i], metrics[j])).collect();
            let coefficient = pearson(&pairs);
            let coefficient = if i == j && !coefficient.is_nan() {
                1.0
            } else {
                coefficient
            };
            matrix[i][j] = coefficient;
            matrix[j][i] = coefficient;
        }
    }

    CorrelationView {
        year,
        axes: Disorder::ALL,
        matrix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{full_record, sample_dataset};

    #[test]
    fn symmetric_with_unit_diagonal() {
        let view = correlation_heatmap(&sample_dataset(), 2019);
        for i in 0..DISORDER_COUNT {
            assert_eq!(view.matrix[i][i], 1.0);
            for j in 0..DISORDER_COUNT {
                let (a, b) = (view.matrix[i][j], view.matrix[j][i]);
                assert!(a == b || (a.is_nan() && b.is_nan()));
                assert!(a.is_nan() || (-1.0..=1.0).contains(&a));
            }
        }
    }

    #[test]
    fn constant_column_propagates_nan() {
        let dataset = Dataset::from_records(vec![
            full_record("Peru", "PER", 2019, [0.2, 0.7, 0.2, 3.1, 0.4, 3.0, 1.2]),
            full_record("Chad", "TCD", 2019, [0.2, 0.6, 0.1, 3.0, 0.5, 2.9, 4.0]),
            full_record("Fiji", "FJI", 2019, [0.2, 0.9, 0.3, 2.0, 0.6, 3.9, 2.0]),
        ])
        .expect("dataset");
        let view = correlation_heatmap(&dataset, 2019);
        assert!(view.get(Disorder::Schizophrenia, Disorder::Schizophrenia).is_nan());
        assert!(view.get(Disorder::Schizophrenia, Disorder::Depression).is_nan());
        assert_eq!(view.get(Disorder::Depression, Disorder::Depression), 1.0);
    }

    #[test]
    fn year_without_rows_is_all_nan() {
        let view = correlation_heatmap(&sample_dataset(), 1800);
        assert!(view.matrix.iter().flatten().all(|value| value.is_nan()));
    }
}
