//! Weighted variation selection
//!
//! Uniform experiments draw an integer in `[0, n)`. Weighted experiments draw
//! a real in `[0, total)` and walk the weights in order, subtracting each one;
//! the first index where the running value is `<= 0` wins. If rounding leaves
//! the value positive after the last weight, the last index is chosen.

use rand::distributions::Standard;
use rand::Rng;

use crate::domain::experiment::{validate_shape, validate_weights, ExperimentDefinition};
use crate::domain::DomainError;

/// Pick one variation index for `definition` from `rng`
///
/// Weights are re-validated here even though registration already checked
/// them, so a definition that bypassed the registry still fails with a
/// configuration error instead of producing a biased index.
pub fn select_variation<R, V>(
    rng: &mut R,
    definition: &ExperimentDefinition<V>,
) -> Result<usize, DomainError>
where
    R: Rng + ?Sized,
{
    let experiment_type = definition.experiment_type();
    let count = definition.variation_count();

    validate_shape(experiment_type, count, definition.weights())?;

    match definition.weights() {
        None => Ok(draw_uniform(rng, count)),
        Some(weights) => {
            let total = validate_weights(experiment_type, weights)?;
            let unit: f64 = rng.sample(Standard);
            Ok(pick_weighted(weights, unit * total))
        }
    }
}

// Sampled as u64 so the draw does not depend on the host's usize width.
fn draw_uniform<R: Rng + ?Sized>(rng: &mut R, count: usize) -> usize {
    rng.gen_range(0..count as u64) as usize
}

/// Cumulative-weight walk for a point `target` in `[0, total)`
pub fn pick_weighted(weights: &[f64], target: f64) -> usize {
    let mut remaining = target;

    for (index, weight) in weights.iter().enumerate() {
        remaining -= weight;

        if remaining <= 0.0 {
            return index;
        }
    }

    weights.len().saturating_sub(1)
}
