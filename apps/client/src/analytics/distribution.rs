//! Market distribution curve for the salary benchmark chart.
//!
//! The service only reports quartiles, so the curve is a normal approximation:
//! σ ≈ IQR / 1.35, centred on the median, sampled over [p25 − σ, p75 + σ].

use serde::Serialize;

/// Number of samples in every generated series.
pub const CURVE_POINTS: usize = 51;

/// Interquartile range of a standard normal distribution (≈ 1.349).
const IQR_TO_SIGMA: f64 = 1.35;

/// Fixed multiplier applied to the density so chart values are not vanishingly small.
pub const DENSITY_SCALE: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionPoint {
    pub x: f64,
    pub density: f64,
}

/// Samples the approximated market distribution.
///
/// Returns an empty series when the quartiles cannot describe a spread
/// (non-finite inputs or `p75 <= p25`); callers render "not available".
pub fn distribution_curve(p25: f64, median: f64, p75: f64) -> Vec<DistributionPoint> {
    if !(p25.is_finite() && median.is_finite() && p75.is_finite()) || p75 <= p25 {
        return Vec::new();
    }

    let sigma = (p75 - p25) / IQR_TO_SIGMA;
    let start = p25 - sigma;
    let end = p75 + sigma;
    let step = (end - start) / (CURVE_POINTS - 1) as f64;

    (0..CURVE_POINTS)
        .map(|i| {
            // Pin the last sample to `end` exactly instead of accumulating error.
            let x = if i == CURVE_POINTS - 1 {
                end
            } else {
                start + step * i as f64
            };
            DistributionPoint {
                x,
                density: normal_density(x, median, sigma) * DENSITY_SCALE,
            }
        })
        .collect()
}

fn normal_density(x: f64, mean: f64, sigma: f64) -> f64 {
    let z = (x - mean) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * std::f64::consts::PI).sqrt())
}

/// The x-value in `series` closest to `target`; the first minimum wins on ties.
/// `None` only for an empty series.
pub fn closest_x(series: &[DistributionPoint], target: f64) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for point in series {
        let distance = (point.x - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((point.x, distance)),
        }
    }
    best.map(|(x, _)| x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salary_curve() -> Vec<DistributionPoint> {
        distribution_curve(1_100_000.0, 1_500_000.0, 2_000_000.0)
    }

    #[test]
    fn test_curve_has_51_positive_points() {
        let curve = salary_curve();
        assert_eq!(curve.len(), CURVE_POINTS);
        assert!(curve.iter().all(|p| p.density > 0.0));
    }

    #[test]
    fn test_curve_spans_quartiles_plus_sigma() {
        let curve = salary_curve();
        let sigma = 900_000.0 / 1.35;
        assert!((curve[0].x - (1_100_000.0 - sigma)).abs() < 1e-6);
        assert_eq!(curve[CURVE_POINTS - 1].x, 2_000_000.0 + sigma);
        assert!(curve.windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn test_peak_is_nearest_sample_to_median() {
        for (p25, median, p75) in [
            (10.0, 20.0, 30.0),
            (1_100_000.0, 1_500_000.0, 2_000_000.0),
            (5.0, 5.5, 40.0),
            (100.0, 390.0, 400.0),
        ] {
            let curve = distribution_curve(p25, median, p75);
            let peak = curve
                .iter()
                .copied()
                .fold(curve[0], |best, p| if p.density > best.density { p } else { best });
            assert_eq!(Some(peak.x), closest_x(&curve, median), "quartiles {p25}/{median}/{p75}");
        }
    }

    #[test]
    fn test_curve_is_deterministic() {
        assert_eq!(salary_curve(), salary_curve());
    }

    #[test]
    fn test_degenerate_quartiles_yield_empty_series() {
        assert!(distribution_curve(10.0, 10.0, 10.0).is_empty());
        assert!(distribution_curve(20.0, 15.0, 10.0).is_empty());
        assert!(distribution_curve(f64::NAN, 1.0, 2.0).is_empty());
    }

    #[test]
    fn test_closest_x_returns_series_member() {
        let curve = salary_curve();
        let x = closest_x(&curve, 1_234_567.0).unwrap();
        assert!(curve.iter().any(|p| p.x == x));
    }

    #[test]
    fn test_closest_x_clamps_to_boundaries() {
        let curve = salary_curve();
        assert_eq!(closest_x(&curve, -1e12), Some(curve[0].x));
        assert_eq!(closest_x(&curve, 1e12), Some(curve[CURVE_POINTS - 1].x));
    }

    #[test]
    fn test_closest_x_first_minimum_wins() {
        let series = [
            DistributionPoint { x: 0.0, density: 1.0 },
            DistributionPoint { x: 2.0, density: 1.0 },
            DistributionPoint { x: 4.0, density: 1.0 },
        ];
        assert_eq!(closest_x(&series, 1.0), Some(0.0));
        assert_eq!(closest_x(&series, 3.0), Some(2.0));
    }

    #[test]
    fn test_closest_x_empty() {
        assert_eq!(closest_x(&[], 5.0), None);
    }
}
