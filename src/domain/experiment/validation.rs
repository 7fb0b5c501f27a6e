//! Experiment definition validation

use thiserror::Error;

/// Validation errors for experiment definitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExperimentValidationError {
    #[error("Experiment type cannot be empty")]
    EmptyType,

    #[error("Experiment '{0}' has no variations")]
    NoVariations(String),

    #[error("Experiment '{experiment_type}' has {weights} weights for {variations} variations")]
    WeightCountMismatch {
        experiment_type: String,
        weights: usize,
        variations: usize,
    },

    #[error("Experiment '{experiment_type}' has a negative weight {weight} at index {index}")]
    NegativeWeight {
        experiment_type: String,
        index: usize,
        weight: f64,
    },

    #[error("Experiment '{experiment_type}' has a non-finite weight at index {index}")]
    NonFiniteWeight {
        experiment_type: String,
        index: usize,
    },

    #[error("Experiment '{experiment_type}' weights must add up to a positive number, got {total}")]
    NonPositiveTotal { experiment_type: String, total: f64 },

    #[error("Experiment '{0}' is already registered")]
    DuplicateType(String),
}

/// Validate an experiment type identifier
pub fn validate_experiment_type(experiment_type: &str) -> Result<(), ExperimentValidationError> {
    if experiment_type.is_empty() {
        return Err(ExperimentValidationError::EmptyType);
    }

    Ok(())
}

/// Validate the shape of a definition: at least one variation and, when
/// weights are present, exactly one weight per variation
pub fn validate_shape(
    experiment_type: &str,
    variation_count: usize,
    weights: Option<&[f64]>,
) -> Result<(), ExperimentValidationError> {
    validate_experiment_type(experiment_type)?;

    if variation_count == 0 {
        return Err(ExperimentValidationError::NoVariations(
            experiment_type.to_string(),
        ));
    }

    if let Some(weights) = weights {
        if weights.len() != variation_count {
            return Err(ExperimentValidationError::WeightCountMismatch {
                experiment_type: experiment_type.to_string(),
                weights: weights.len(),
                variations: variation_count,
            });
        }
    }

    Ok(())
}

/// Validate weight values and return their total
///
/// Every weight must be finite and non-negative, and the total must be
/// strictly positive.
pub fn validate_weights(
    experiment_type: &str,
    weights: &[f64],
) -> Result<f64, ExperimentValidationError> {
    let mut total = 0.0;

    for (index, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() {
            return Err(ExperimentValidationError::NonFiniteWeight {
                experiment_type: experiment_type.to_string(),
                index,
            });
        }

        if weight < 0.0 {
            return Err(ExperimentValidationError::NegativeWeight {
                experiment_type: experiment_type.to_string(),
                index,
                weight,
            });
        }

        total += weight;
    }

    if total <= 0.0 || !total.is_finite() {
        return Err(ExperimentValidationError::NonPositiveTotal {
            experiment_type: experiment_type.to_string(),
            total,
        });
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod shape_validation {
        use super::*;

        #[test]
        fn test_valid_shapes() {
            assert!(validate_shape("menu-order", 1, None).is_ok());
            assert!(validate_shape("prob", 3, Some(&[0.5, 0.5, 0.01])).is_ok());
            assert!(validate_shape("any string at all!", 2, None).is_ok());
        }

        #[test]
        fn test_empty_type() {
            assert_eq!(
                validate_shape("", 2, None),
                Err(ExperimentValidationError::EmptyType)
            );
        }

        #[test]
        fn test_no_variations() {
            assert_eq!(
                validate_shape("exp", 0, None),
                Err(ExperimentValidationError::NoVariations("exp".to_string()))
            );
        }

        #[test]
        fn test_weight_count_mismatch() {
            assert_eq!(
                validate_shape("exp", 3, Some(&[0.5, 0.5])),
                Err(ExperimentValidationError::WeightCountMismatch {
                    experiment_type: "exp".to_string(),
                    weights: 2,
                    variations: 3,
                })
            );
        }
    }

    mod weight_validation {
        use super::*;

        #[test]
        fn test_total() {
            let total = validate_weights("exp", &[0.5, 0.5, 0.01]).unwrap();
            assert!((total - 1.01).abs() < 1e-12);
        }

        #[test]
        fn test_zero_weights_allowed_if_total_positive() {
            assert!(validate_weights("exp", &[0.0, 1.0]).is_ok());
        }

        #[test]
        fn test_negative_weight() {
            assert_eq!(
                validate_weights("exp", &[1.0, -0.5]),
                Err(ExperimentValidationError::NegativeWeight {
                    experiment_type: "exp".to_string(),
                    index: 1,
                    weight: -0.5,
                })
            );
        }

        #[test]
        fn test_zero_total() {
            assert!(matches!(
                validate_weights("exp", &[0.0, 0.0]),
                Err(ExperimentValidationError::NonPositiveTotal { .. })
            ));
        }

        #[test]
        fn test_non_finite() {
            assert!(matches!(
                validate_weights("exp", &[f64::NAN, 1.0]),
                Err(ExperimentValidationError::NonFiniteWeight { index: 0, .. })
            ));
            assert!(matches!(
                validate_weights("exp", &[1.0, f64::INFINITY]),
                Err(ExperimentValidationError::NonFiniteWeight { index: 1, .. })
            ));
        }

        #[test]
        fn test_overflowing_total() {
            assert!(matches!(
                validate_weights("exp", &[f64::MAX, f64::MAX]),
                Err(ExperimentValidationError::NonPositiveTotal { .. })
            ));
        }
    }
}
