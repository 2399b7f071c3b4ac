//! Small numeric helpers shared by the view producers.

/// Arithmetic mean of the present values; `None` when nothing is present.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0f64, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Pearson correlation over the pairs where both sides are present.
///
/// Returns NaN when fewer than two complete pairs exist or either side has
/// zero variance.
pub fn pearson(pairs: &[(Option<f64>, Option<f64>)]) -> f64 {
    let complete: Vec<(f64, f64)> = pairs
        .iter()
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) => Some((*x, *y)),
            _ => None,
        })
        .collect();
    if complete.len() < 2
        || is_constant(complete.iter().map(|(x, _)| *x))
        || is_constant(complete.iter().map(|(_, y)| *y))
    {
        return f64::NAN;
    }

    let n = complete.len() as f64;
    let mean_x = complete.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = complete.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in &complete {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return f64::NAN;
    }
    (covariance / (variance_x.sqrt() * variance_y.sqrt())).clamp(-1.0, 1.0)
}

/// `sum / n` over equal values can be off by an ulp and leave a tiny
/// variance, so constancy is checked on the values themselves.
fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|value| value == first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_skips_missing() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn pearson_detects_linear_relationships() {
        let rising = [(Some(1.0), Some(2.0)), (Some(2.0), Some(4.0)), (Some(3.0), Some(6.0))];
        assert!((pearson(&rising) - 1.0).abs() < 1e-12);

        let falling = [(Some(1.0), Some(3.0)), (Some(2.0), Some(2.0)), (Some(3.0), Some(1.0))];
        assert!((pearson(&falling) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_uses_pairwise_complete_observations() {
        let pairs = [
            (Some(1.0), Some(1.0)),
            (None, Some(50.0)),
            (Some(2.0), Some(2.0)),
            (Some(80.0), None),
            (Some(3.0), Some(3.0)),
        ];
        assert!((pearson(&pairs) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_nan_without_variance_or_pairs() {
        assert!(pearson(&[(Some(1.0), Some(2.0)), (Some(1.0), Some(3.0))]).is_nan());
        assert!(pearson(&[(Some(1.0), Some(2.0))]).is_nan());
        assert!(pearson(&[]).is_nan());
    }

    #[test]
    fn pearson_is_nan_for_constant_column_with_inexact_mean() {
        // 0.2 * 3 / 3 != 0.2 in binary floating point.
        let pairs = [(Some(0.2), Some(3.0)), (Some(0.2), Some(2.9)), (Some(0.2), Some(3.9))];
        assert!(pearson(&pairs).is_nan());
        let same = [(Some(0.2), Some(0.2)), (Some(0.2), Some(0.2)), (Some(0.2), Some(0.2))];
        assert!(pearson(&same).is_nan());
    }
}
