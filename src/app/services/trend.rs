//! Least-squares trend lines
//!
//! Fits `y = slope * x + intercept` over the points that have a value and
//! returns the line's endpoints at the smallest and largest x.

use crate::app::models::{TrendInput, TrendLine, TrendPoint};

/// Fit an ordinary least-squares line
///
/// Points with a missing or non-finite y are ignored. Returns `None` when fewer
/// than two points remain or when every x is the same.
pub fn fit_trend_line(points: &[TrendInput]) -> Option<TrendLine> {
    let points: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|point| point.y.filter(|y| y.is_finite()).map(|y| (point.x, y)))
        .filter(|(x, _)| x.is_finite())
        .collect();

    if points.len() < 2 {
        return None;
    }

    let min_x = points.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|(x, _)| *x).fold(f64::NEG_INFINITY, f64::max);
    if min_x == max_x {
        return None;
    }

    // Sums run over x - min_x; the fitted line is unchanged
    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) =
        points
            .iter()
            .fold((0.0, 0.0, 0.0, 0.0), |(sx, sy, sxy, sxx), &(x, y)| {
                let x = x - min_x;
                (sx + x, sy + y, sxy + x * y, sxx + x * x)
            });

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }

    let at = |x: f64| TrendPoint {
        x,
        y: slope * (x - min_x) + intercept,
    };

    Some(TrendLine {
        p0: at(min_x),
        p1: at(max_x),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(f64, Option<f64>)]) -> Vec<TrendInput> {
        pairs.iter().map(|&(x, y)| TrendInput::new(x, y)).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_exact_line() {
        let line =
            fit_trend_line(&inputs(&[(0.0, Some(0.0)), (1.0, Some(2.0)), (2.0, Some(4.0))]))
                .unwrap();

        assert_eq!(line.p0.x, 0.0);
        assert_eq!(line.p1.x, 2.0);
        assert_close(line.p0.y, 0.0);
        assert_close(line.p1.y, 4.0);
        assert_close(line.slope(), 2.0);
    }

    #[test]
    fn test_noisy_fit() {
        let line = fit_trend_line(&inputs(&[
            (0.0, Some(1.5)),
            (1.0, Some(1.5)),
            (2.0, Some(3.5)),
            (3.0, Some(3.5)),
        ]))
        .unwrap();

        assert_close(line.slope(), 0.8);
        assert_close(line.p0.y, 1.3);
        assert_close(line.p1.y, 3.7);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let line = fit_trend_line(&inputs(&[
            (0.0, Some(1.0)),
            (1.0, None),
            (2.0, Some(f64::NAN)),
            (3.0, Some(4.0)),
        ]))
        .unwrap();

        assert_eq!(line.p0.x, 0.0);
        assert_eq!(line.p1.x, 3.0);
        assert_close(line.slope(), 1.0);
    }

    #[test]
    fn test_too_few_points() {
        assert!(fit_trend_line(&[]).is_none());
        assert!(fit_trend_line(&inputs(&[(1.0, Some(1.0))])).is_none());
        assert!(fit_trend_line(&inputs(&[(1.0, Some(1.0)), (2.0, None)])).is_none());
    }

    #[test]
    fn test_identical_x_is_no_trend() {
        assert!(fit_trend_line(&inputs(&[(5.0, Some(1.0)), (5.0, Some(3.0))])).is_none());
    }

    #[test]
    fn test_unordered_input_uses_extremes() {
        let line =
            fit_trend_line(&inputs(&[(2.0, Some(4.0)), (0.0, Some(0.0)), (1.0, Some(2.0))]))
                .unwrap();

        assert_eq!(line.p0.x, 0.0);
        assert_eq!(line.p1.x, 2.0);
    }

    #[test]
    fn test_epoch_millisecond_inputs() {
        let start = 1_704_067_200_000.0;
        let day = 86_400_000.0;
        let line = fit_trend_line(&inputs(&[
            (start, Some(60.0)),
            (start + day, Some(61.0)),
            (start + 2.0 * day, Some(62.0)),
        ]))
        .unwrap();

        assert_close(line.p0.y, 60.0);
        assert_close(line.p1.y, 62.0);
        assert!((line.slope_per_day() - 1.0).abs() < 1e-6);
    }
}
