//! Assignment service for A/B testing
//!
//! Provides the query surface request-handling code uses: full suites,
//! single-experiment resolution, payload lookup and distribution checks.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::experiment::{
    Assigner, AssignmentSuite, DistributionReport, Registry, SeedingStrategy,
};
use crate::domain::DomainError;
use crate::infrastructure::experiment::{build_distribution_report, SuiteGenerator};

/// Service for deterministic experiment assignment
#[derive(Debug)]
pub struct AssignmentService<V> {
    generator: SuiteGenerator<V>,
}

impl<V> AssignmentService<V> {
    /// Create a new assignment service over a frozen registry
    pub fn new(registry: Registry<V>, strategy: SeedingStrategy) -> Self {
        Self::with_shared_registry(Arc::new(registry), strategy)
    }

    /// Create a service over a registry shared with other components
    pub fn with_shared_registry(registry: Arc<Registry<V>>, strategy: SeedingStrategy) -> Self {
        info!(
            experiments = registry.len(),
            strategy = %strategy,
            "Assignment service ready"
        );

        Self {
            generator: SuiteGenerator::new(registry, strategy),
        }
    }

    pub fn registry(&self) -> &Registry<V> {
        self.generator.registry()
    }

    pub fn strategy(&self) -> SeedingStrategy {
        self.generator.strategy()
    }

    /// Compute the full assignment suite for an identity
    pub fn compute_suite(&self, identity: &str) -> Result<AssignmentSuite, DomainError> {
        self.generator.compute_suite(identity)
    }

    /// Resolve the variation index of one experiment for an identity
    pub fn resolve(&self, experiment_type: &str, identity: &str) -> Result<usize, DomainError> {
        self.generator.resolve(experiment_type, identity)
    }

    /// Resolve one experiment and return the chosen variation payload
    pub fn variation(&self, experiment_type: &str, identity: &str) -> Result<&V, DomainError> {
        self.resolve_variation(experiment_type, identity)
            .map(|(_, variation)| variation)
    }

    /// Resolve one experiment once, returning both the index and its payload
    pub fn resolve_variation(
        &self,
        experiment_type: &str,
        identity: &str,
    ) -> Result<(usize, &V), DomainError> {
        let index = self.resolve(experiment_type, identity)?;
        let definition = self.registry().find(experiment_type)?;

        let variation = definition.variation(index).ok_or_else(|| {
            DomainError::internal(format!(
                "Index {} out of range for experiment '{}'",
                index, experiment_type
            ))
        })?;

        Ok((index, variation))
    }

    /// Assign every identity and compare the spread with the expected shares
    pub fn distribution<I, S>(
        &self,
        experiment_type: &str,
        identities: I,
    ) -> Result<DistributionReport, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let definition = self.registry().find(experiment_type)?;
        let expected_shares = definition.expected_shares()?;
        let mut counts = vec![0u64; definition.variation_count()];

        for identity in identities {
            let index = self.resolve(experiment_type, identity.as_ref())?;
            counts[index] += 1;
        }

        let report = build_distribution_report(experiment_type, &counts, &expected_shares);

        debug!(
            experiment_type = %experiment_type,
            samples = report.samples,
            max_deviation = report.max_deviation(),
            "Computed assignment distribution"
        );

        Ok(report)
    }
}

impl<V: Send + Sync> Assigner for AssignmentService<V> {
    fn compute_suite(&self, identity: &str) -> Result<AssignmentSuite, DomainError> {
        AssignmentService::compute_suite(self, identity)
    }

    fn resolve(&self, experiment_type: &str, identity: &str) -> Result<usize, DomainError> {
        AssignmentService::resolve(self, experiment_type, identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::experiment::{AssignmentContext, ExperimentDefinition, RegistryBuilder};

    fn service(strategy: SeedingStrategy) -> AssignmentService<&'static str> {
        let mut builder = RegistryBuilder::new();
        builder
            .register(vec![
                ExperimentDefinition::new("menu-order", vec!["classic"]),
                ExperimentDefinition::new("mailing-list", vec!["ask", "skip"]),
                ExperimentDefinition::new("prob", vec!["a", "b", "c"])
                    .with_weights(vec![0.5, 0.5, 0.01]),
            ])
            .unwrap();
        AssignmentService::new(builder.build(), strategy)
    }

    fn identities(n: usize) -> impl Iterator<Item = String> {
        (0..n).map(|i| i.to_string())
    }

    mod fairness {
        use super::*;

        #[test]
        fn test_uniform_two_way_split() {
            let service = service(SeedingStrategy::SharedStream);
            let report = service.distribution("mailing-list", identities(10_000)).unwrap();

            assert_eq!(report.samples, 10_000);
            for share in &report.variations {
                assert!(
                    (share.observed_share - 0.5).abs() < 0.02,
                    "variation {} got {}",
                    share.index,
                    share.observed_share
                );
            }
        }

        #[test]
        fn test_weighted_rare_variation() {
            let service = service(SeedingStrategy::SharedStream);
            let report = service.distribution("prob", identities(10_000)).unwrap();

            let rare = report.share(2).unwrap();
            assert!((rare.expected_share - 0.01 / 1.01).abs() < 1e-12);
            assert!(
                (rare.observed_share - 0.0099).abs() < 0.004,
                "rare variation got {}",
                rare.observed_share
            );
            for index in 0..2 {
                let share = report.share(index).unwrap();
                assert!((share.observed_share - 0.5 / 1.01).abs() < 0.02);
            }
        }

        #[test]
        fn test_per_experiment_fairness() {
            let service = service(SeedingStrategy::PerExperiment);
            let report = service.distribution("mailing-list", identities(10_000)).unwrap();
            assert!(report.max_deviation() < 0.02);
        }

        #[test]
        fn test_single_variation_distribution() {
            let service = service(SeedingStrategy::SharedStream);
            let report = service.distribution("menu-order", identities(500)).unwrap();
            assert_eq!(report.variations[0].count, 500);
            assert!(report.is_consistent(0.05));
        }

        #[test]
        fn test_distribution_unknown_type() {
            let service = service(SeedingStrategy::SharedStream);
            let err = service.distribution("checkout", identities(10)).unwrap_err();
            assert!(err.is_unknown_experiment());
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn test_variation_payload() {
            let service = service(SeedingStrategy::SharedStream);
            assert_eq!(*service.variation("menu-order", "42").unwrap(), "classic");

            let index = service.resolve("mailing-list", "42").unwrap();
            let payload = service.variation("mailing-list", "42").unwrap();
            assert_eq!(*payload, ["ask", "skip"][index]);
        }

        #[test]
        fn test_resolve_variation_pairs_index_with_payload() {
            let service = service(SeedingStrategy::SharedStream);

            let (index, payload) = service.resolve_variation("mailing-list", "42").unwrap();
            assert_eq!((index, *payload), (1, "skip"));

            let (index, payload) = service.resolve_variation("prob", "user-11").unwrap();
            assert_eq!((index, *payload), (1, "b"));

            assert!(service
                .resolve_variation("checkout", "42")
                .unwrap_err()
                .is_unknown_experiment());
        }

        #[test]
        fn test_unknown_type() {
            let service = service(SeedingStrategy::SharedStream);
            assert_eq!(
                service.resolve("checkout", "42").unwrap_err(),
                DomainError::unknown_experiment("checkout")
            );
            assert!(service.variation("checkout", "42").is_err());
        }

        #[test]
        fn test_context_over_service() {
            let service: Arc<dyn Assigner> = Arc::new(service(SeedingStrategy::SharedStream));
            let expected = service.compute_suite("42").unwrap();

            let ctx = AssignmentContext::new("42", Arc::clone(&service));
            assert_eq!(ctx.suite().unwrap(), &expected);
            assert_eq!(ctx.variation("menu-order").unwrap(), 0);
            assert_eq!(
                ctx.variation("prob").unwrap(),
                service.resolve("prob", "42").unwrap()
            );
        }
    }
}
