//! Statistical helpers for checking assignment distributions
//!
//! Each variation's count is treated as a binomial sample and compared with
//! its expected share using the normal approximation.

use crate::domain::experiment::{DistributionReport, VariationShare};

/// z-score of `count` successes out of `samples` against probability `expected_share`
///
/// Returns `None` when the variance is zero (no samples, or an expected share
/// of exactly 0 or 1).
pub fn binomial_z_score(count: u64, samples: u64, expected_share: f64) -> Option<f64> {
    if samples == 0 {
        return None;
    }

    let n = samples as f64;
    let variance = n * expected_share * (1.0 - expected_share);

    if variance <= 0.0 {
        return None;
    }

    Some((count as f64 - n * expected_share) / variance.sqrt())
}

/// Two-tailed p-value for a standard normal statistic
pub fn two_tailed_p_value(z: f64) -> f64 {
    (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Build a report from per-variation counts and expected shares
///
/// `counts` and `expected_shares` are indexed by variation.
pub fn build_distribution_report(
    experiment_type: &str,
    counts: &[u64],
    expected_shares: &[f64],
) -> DistributionReport {
    let samples: u64 = counts.iter().sum();

    let variations = counts
        .iter()
        .zip(expected_shares)
        .enumerate()
        .map(|(index, (&count, &expected_share))| {
            let z_score = binomial_z_score(count, samples, expected_share);
            let observed_share = if samples == 0 {
                0.0
            } else {
                count as f64 / samples as f64
            };

            VariationShare {
                index,
                count,
                observed_share,
                expected_share,
                z_score,
                p_value: z_score.map(two_tailed_p_value),
            }
        })
        .collect();

    DistributionReport {
        experiment_type: experiment_type.to_string(),
        samples,
        variations,
    }
}

/// Standard normal cumulative distribution function
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Error function approximation
///
/// Abramowitz and Stegun 7.1.26, accurate to about 1.5e-7.
fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}
