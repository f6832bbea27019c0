//! Optional-aware weighted folds.
//!
//! Every aggregated metric goes through one of these two functions. Samples
//! whose metric is `None` are dropped and the remaining weights are
//! renormalised, so a station missing one sensor still contributes to every
//! other metric.

/// Weighted arithmetic mean of `metric` over `samples`.
///
/// Returns `None` when no sample carries a value (or the carried weights sum
/// to zero), never `0.0`.
///
/// ```rust
/// use ski_weather::mean::weighted_mean;
///
/// let depths = [Some(40.0), None, Some(20.0)];
/// let samples = [(3.0, &depths[0]), (5.0, &depths[1]), (1.0, &depths[2])];
/// assert_eq!(weighted_mean(samples, |d| *d), Some(35.0));
/// ```
pub fn weighted_mean<'a, T: 'a>(
    samples: impl IntoIterator<Item = (f64, &'a T)>,
    metric: impl Fn(&T) -> Option<f64>,
) -> Option<f64> {
    let mut total = 0.0;
    let mut weight_sum = 0.0;
    for (weight, item) in samples {
        if let Some(value) = metric(item) {
            total += value * weight;
            weight_sum += weight;
        }
    }
    (weight_sum > 0.0).then(|| total / weight_sum)
}

/// Weighted circular mean of compass bearings, in degrees within `[0, 360)`.
///
/// Bearings are averaged as unit vectors, so 350° and 10° average to 0°
/// rather than 180°. When the vectors cancel exactly the result is 0°.
pub fn weighted_circular_mean<'a, T: 'a>(
    samples: impl IntoIterator<Item = (f64, &'a T)>,
    metric: impl Fn(&T) -> Option<f64>,
) -> Option<f64> {
    let mut sin_sum = 0.0;
    let mut cos_sum = 0.0;
    let mut weight_sum = 0.0;
    for (weight, item) in samples {
        if let Some(deg) = metric(item) {
            let rad = deg.to_radians();
            sin_sum += rad.sin() * weight;
            cos_sum += rad.cos() * weight;
            weight_sum += weight;
        }
    }
    if weight_sum <= 0.0 {
        return None;
    }
    let deg = (sin_sum / weight_sum).atan2(cos_sum / weight_sum).to_degrees();
    Some(if deg < 0.0 { deg + 360.0 } else { deg })
}

/// Unweighted variants for reducing one station's readings.
pub fn mean<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    metric: impl Fn(&T) -> Option<f64>,
) -> Option<f64> {
    weighted_mean(items.into_iter().map(|item| (1.0, item)), metric)
}

pub fn circular_mean<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    metric: impl Fn(&T) -> Option<f64>,
) -> Option<f64> {
    weighted_circular_mean(items.into_iter().map(|item| (1.0, item)), metric)
}

/// Round a bearing to whole degrees, folding 360 back to 0.
pub fn round_bearing(deg: f64) -> i32 {
    (deg.round() as i32).rem_euclid(360)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_mean_skips_missing() {
        let values = [Some(10.0), None, Some(30.0)];
        let samples = values.iter().map(|v| (1.0, v));
        assert_eq!(weighted_mean(samples, |v| *v), Some(20.0));
    }

    #[test]
    fn test_weighted_mean_all_missing_is_none() {
        let values: [Option<f64>; 2] = [None, None];
        assert_eq!(weighted_mean(values.iter().map(|v| (0.5, v)), |v| *v), None);
        let empty: [Option<f64>; 0] = [];
        assert_eq!(weighted_mean(empty.iter().map(|v| (1.0, v)), |v| *v), None);
    }

    #[test]
    fn test_weighted_mean_renormalizes() {
        // Weight 0.8 on the only present value: result is the value itself
        let values = [Some(12.0), None];
        let weights = [0.8, 0.2];
        let samples = weights.iter().copied().zip(values.iter());
        let result = weighted_mean(samples, |v| *v).unwrap();
        assert!((result - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_unweighted() {
        let values = [Some(1.0), Some(2.0), Some(6.0)];
        assert_eq!(mean(values.iter(), |v| *v), Some(3.0));
    }

    #[test]
    fn test_circular_mean_wraps_north() {
        let values = [Some(350.0), Some(10.0)];
        let result = circular_mean(values.iter(), |v| *v).unwrap();
        assert_eq!(round_bearing(result), 0);
    }

    #[test]
    fn test_circular_mean_plain_case() {
        let values = [Some(80.0), Some(100.0), None];
        let result = circular_mean(values.iter(), |v| *v).unwrap();
        assert!((result - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_circular_mean_leans_to_heavier() {
        let values = [Some(350.0), Some(10.0)];
        let weights = [4.1 / 5.2, 1.1 / 5.2];
        let samples = weights.iter().copied().zip(values.iter());
        let result = weighted_circular_mean(samples, |v| *v).unwrap();
        assert_eq!(round_bearing(result), 354);
    }

    #[test]
    fn test_circular_mean_missing_is_none() {
        let values: [Option<f64>; 1] = [None];
        assert_eq!(circular_mean(values.iter(), |v| *v), None);
    }

    #[test]
    fn test_round_bearing_folds_360() {
        assert_eq!(round_bearing(359.6), 0);
        assert_eq!(round_bearing(270.4), 270);
        assert_eq!(round_bearing(0.0), 0);
    }
}
