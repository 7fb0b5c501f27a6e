//! Experiment domain entities

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::{validate_shape, validate_weights, ExperimentValidationError};

// ============================================================================
// SeedingStrategy
// ============================================================================

/// How random draws are seeded for an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeedingStrategy {
    /// One generator per identity, consumed in registration order.
    ///
    /// The assignment of an experiment depends on how many draws the
    /// experiments registered before it consumed, so adding, removing or
    /// reordering experiments re-buckets every later experiment.
    #[default]
    SharedStream,
    /// One generator per (experiment, identity) pair.
    ///
    /// Experiments are independent and registration order has no effect.
    PerExperiment,
}

impl fmt::Display for SeedingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharedStream => write!(f, "shared_stream"),
            Self::PerExperiment => write!(f, "per_experiment"),
        }
    }
}

// ============================================================================
// DuplicatePolicy
// ============================================================================

/// What the registry does when a type is registered twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail registration with a configuration error
    #[default]
    Reject,
    /// Keep the duplicate in the ordered list; lookups resolve to the first
    FirstWins,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::FirstWins => write!(f, "first_wins"),
        }
    }
}

// ============================================================================
// ExperimentDefinition
// ============================================================================

/// Immutable description of one experiment
///
/// `V` is the caller's variation payload. The assignment engine only ever
/// returns indices into `variations` and never inspects the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentDefinition<V> {
    #[serde(rename = "type")]
    experiment_type: String,
    variations: Vec<V>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weights: Option<Vec<f64>>,
}

impl<V> ExperimentDefinition<V> {
    /// Create an unweighted definition (uniform over variations)
    pub fn new(experiment_type: impl Into<String>, variations: Vec<V>) -> Self {
        Self {
            experiment_type: experiment_type.into(),
            variations,
            weights: None,
        }
    }

    /// Set relative weights, one per variation
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Get the experiment type
    pub fn experiment_type(&self) -> &str {
        &self.experiment_type
    }

    /// Get all variations in order
    pub fn variations(&self) -> &[V] {
        &self.variations
    }

    /// Get the variation at `index`
    pub fn variation(&self, index: usize) -> Option<&V> {
        self.variations.get(index)
    }

    pub fn variation_count(&self) -> usize {
        self.variations.len()
    }

    /// Get the weights, if any
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Check every invariant of the definition
    pub fn validate(&self) -> Result<(), ExperimentValidationError> {
        validate_shape(
            &self.experiment_type,
            self.variations.len(),
            self.weights.as_deref(),
        )?;

        if let Some(weights) = &self.weights {
            validate_weights(&self.experiment_type, weights)?;
        }

        Ok(())
    }

    /// Long-run probability of each variation being assigned
    pub fn expected_shares(&self) -> Result<Vec<f64>, ExperimentValidationError> {
        self.validate()?;

        match &self.weights {
            Some(weights) => {
                let total = validate_weights(&self.experiment_type, weights)?;
                Ok(weights.iter().map(|w| w / total).collect())
            }
            None => {
                let n = self.variations.len() as f64;
                Ok(vec![1.0 / n; self.variations.len()])
            }
        }
    }

    /// Replace payloads while keeping type and weights
    pub fn map_variations<U>(self, f: impl FnMut(V) -> U) -> ExperimentDefinition<U> {
        ExperimentDefinition {
            experiment_type: self.experiment_type,
            variations: self.variations.into_iter().map(f).collect(),
            weights: self.weights,
        }
    }
}
