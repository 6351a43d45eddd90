//! Tail diagnostics as plain data
//!
//! The numbers behind the classic threshold-selection and
//! heavy-tailedness plots: empirical CDF, empirical mean excess and
//! maximum-to-sum ratio curves. No rendering happens here; downstream
//! visualization consumes the returned pairs directly.

use evt_core::{Error, Result};

/// Empirical distribution function of a sample.
///
/// Returns `(value, probability)` pairs sorted by value, with
/// probabilities `i / (n + 1)` strictly inside (0, 1). Duplicate values
/// keep their first (smallest) probability.
pub fn empirical_cdf(sample: &[f64]) -> Result<Vec<(f64, f64)>> {
    if sample.is_empty() {
        return Err(Error::empty_input());
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite("sample"));
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let mut cdf = Vec::with_capacity(sorted.len());
    for (i, &value) in sorted.iter().enumerate() {
        if i > 0 && sorted[i - 1] == value {
            continue;
        }
        cdf.push((value, (i + 1) as f64 / (n + 1.0)));
    }
    Ok(cdf)
}

/// Empirical mean excess function.
///
/// For each observed value `t` (taken as a threshold), the average excess
/// of the observations strictly larger than `t`. Returns
/// `(threshold, mean_excess)` pairs sorted by threshold; the sample
/// maximum yields no point since nothing exceeds it.
pub fn mean_excess(sample: &[f64]) -> Result<Vec<(f64, f64)>> {
    if sample.is_empty() {
        return Err(Error::empty_input());
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite("sample"));
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut points = Vec::with_capacity(sorted.len().saturating_sub(1));
    let mut running_sum = sorted[0];
    for i in 1..sorted.len() {
        let threshold = sorted[i];
        // Duplicate thresholds keep the first point, where every tied
        // observation still counts as an excess of zero.
        if threshold < sorted[i - 1] || points.is_empty() {
            points.push((threshold, running_sum / i as f64 - threshold));
        }
        running_sum += threshold;
    }
    points.reverse();
    Ok(points)
}

/// Cumulative maximum-to-sum ratios `max(|x|^p) / sum(|x|^p)`.
///
/// One ratio per observation prefix, for the given moment `p >= 1`. For a
/// distribution with a finite p-th moment the ratio decays toward zero;
/// ratios stabilizing away from zero signal a heavy tail.
pub fn maximum_to_sum(sample: &[f64], moment: u32) -> Result<Vec<f64>> {
    if sample.is_empty() {
        return Err(Error::empty_input());
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite("sample"));
    }
    if moment < 1 {
        return Err(Error::InvalidInput("moment must be >= 1".to_string()));
    }

    let mut running_max = 0.0f64;
    let mut running_sum = 0.0f64;
    let mut ratios = Vec::with_capacity(sample.len());
    for &x in sample {
        let powered = x.abs().powi(moment as i32);
        running_max = running_max.max(powered);
        running_sum += powered;
        ratios.push(if running_sum > 0.0 {
            running_max / running_sum
        } else {
            // all-zero prefix
            1.0
        });
    }
    Ok(ratios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empirical_cdf_probabilities() {
        let cdf = empirical_cdf(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(cdf.len(), 3);
        assert_relative_eq!(cdf[0].1, 0.25);
        assert_relative_eq!(cdf[1].1, 0.5);
        assert_relative_eq!(cdf[2].1, 0.75);
        assert_eq!(cdf[0].0, 1.0);
        assert_eq!(cdf[2].0, 3.0);
    }

    #[test]
    fn test_empirical_cdf_duplicates_keep_first() {
        let cdf = empirical_cdf(&[1.0, 2.0, 2.0, 3.0]).unwrap();
        assert_eq!(cdf.len(), 3);
        // the duplicated 2.0 keeps the smaller probability 2/5
        assert_relative_eq!(cdf[1].1, 0.4);
    }

    #[test]
    fn test_mean_excess_simple() {
        let points = mean_excess(&[1.0, 2.0, 4.0]).unwrap();
        // threshold 2: mean(4) - 2 = 2; threshold 1: mean(4, 2) - 1 = 2
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0].0, 1.0);
        assert_relative_eq!(points[0].1, 2.0);
        assert_relative_eq!(points[1].0, 2.0);
        assert_relative_eq!(points[1].1, 2.0);
    }

    #[test]
    fn test_maximum_to_sum_decays_for_light_tail() {
        let sample: Vec<f64> = (1..=100).map(|_| 1.0).collect();
        let ratios = maximum_to_sum(&sample, 2).unwrap();
        assert_relative_eq!(ratios[0], 1.0);
        assert_relative_eq!(ratios[99], 0.01);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(empirical_cdf(&[]).is_err());
        assert!(mean_excess(&[f64::NAN]).is_err());
        assert!(maximum_to_sum(&[1.0], 0).is_err());
    }
}
