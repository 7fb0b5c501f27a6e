//! Distribution report types for checking assignment fairness

use serde::{Deserialize, Serialize};

// ============================================================================
// VariationShare
// ============================================================================

/// Observed versus expected assignment share of one variation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariationShare {
    /// Variation index
    pub index: usize,
    /// Number of sampled identities assigned to this variation
    pub count: u64,
    /// `count / samples`
    pub observed_share: f64,
    /// Long-run probability implied by the weights
    pub expected_share: f64,
    /// Binomial z-score of the deviation, when defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    /// Two-tailed p-value of the deviation, when defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
}

impl VariationShare {
    /// Absolute difference between observed and expected share
    pub fn deviation(&self) -> f64 {
        (self.observed_share - self.expected_share).abs()
    }
}

// ============================================================================
// DistributionReport
// ============================================================================

/// How a sample of identities spread over one experiment's variations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub experiment_type: String,
    pub samples: u64,
    pub variations: Vec<VariationShare>,
}

impl DistributionReport {
    /// Largest absolute deviation across variations
    pub fn max_deviation(&self) -> f64 {
        self.variations
            .iter()
            .map(VariationShare::deviation)
            .fold(0.0, f64::max)
    }

    /// Get the share of a variation
    pub fn share(&self, index: usize) -> Option<&VariationShare> {
        self.variations.iter().find(|v| v.index == index)
    }

    /// Whether every variation is consistent with its expected share at
    /// significance level `alpha`
    ///
    /// Variations without a defined p-value (expected share of 0 or 1) are
    /// consistent only if observed equals expected.
    pub fn is_consistent(&self, alpha: f64) -> bool {
        self.variations.iter().all(|v| match v.p_value {
            Some(p) => p >= alpha,
            None => v.deviation() == 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(index: usize, observed: f64, expected: f64, p_value: Option<f64>) -> VariationShare {
        VariationShare {
            index,
            count: 0,
            observed_share: observed,
            expected_share: expected,
            z_score: None,
            p_value,
        }
    }

    #[test]
    fn test_max_deviation() {
        let report = DistributionReport {
            experiment_type: "exp".to_string(),
            samples: 100,
            variations: vec![share(0, 0.52, 0.5, Some(0.7)), share(1, 0.48, 0.5, Some(0.7))],
        };
        assert!((report.max_deviation() - 0.02).abs() < 1e-9);
        assert!(report.is_consistent(0.05));
        assert_eq!(report.share(1).unwrap().index, 1);
        assert!(report.share(2).is_none());
    }

    #[test]
    fn test_inconsistent() {
        let report = DistributionReport {
            experiment_type: "exp".to_string(),
            samples: 100,
            variations: vec![share(0, 0.9, 0.5, Some(0.0001)), share(1, 0.1, 0.5, Some(0.0001))],
        };
        assert!(!report.is_consistent(0.05));
    }

    #[test]
    fn test_certain_variation() {
        let report = DistributionReport {
            experiment_type: "menu-order".to_string(),
            samples: 10,
            variations: vec![share(0, 1.0, 1.0, None)],
        };
        assert!(report.is_consistent(0.05));
    }
}
