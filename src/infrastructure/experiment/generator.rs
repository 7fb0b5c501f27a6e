//! Suite generation: one deterministic pass over the registry per identity

use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::debug;

use super::seed::{derive_experiment_seed, derive_seed, seeded_rng};
use super::selector::select_variation;
use crate::domain::experiment::{AssignmentSuite, ExperimentDefinition, Registry, SeedingStrategy};
use crate::domain::DomainError;

/// Computes assignment suites from a frozen registry
///
/// Holds no mutable state; every call seeds its own generator, so one
/// instance can serve any number of threads.
#[derive(Debug)]
pub struct SuiteGenerator<V> {
    registry: Arc<Registry<V>>,
    strategy: SeedingStrategy,
}

impl<V> SuiteGenerator<V> {
    pub fn new(registry: Arc<Registry<V>>, strategy: SeedingStrategy) -> Self {
        Self { registry, strategy }
    }

    pub fn registry(&self) -> &Registry<V> {
        &self.registry
    }

    pub fn strategy(&self) -> SeedingStrategy {
        self.strategy
    }

    /// Assign every registered experiment for `identity`
    pub fn compute_suite(&self, identity: &str) -> Result<AssignmentSuite, DomainError> {
        let mut suite = AssignmentSuite::new();
        let mut draws = Draws::new(self.strategy, identity)?;

        for definition in self.registry.iter() {
            let index = draws.next(definition)?;
            suite.record(definition.experiment_type(), index);
        }

        debug!(
            identity = %identity,
            strategy = %self.strategy,
            experiments = suite.len(),
            "Computed assignment suite"
        );

        Ok(suite)
    }

    /// Resolve one experiment for `identity`
    ///
    /// Under the shared stream every experiment registered before this one
    /// is still drawn, since their draws determine this one's.
    pub fn resolve(&self, experiment_type: &str, identity: &str) -> Result<usize, DomainError> {
        let position = self.registry.position(experiment_type)?;
        let mut draws = Draws::new(self.strategy, identity)?;

        let index = match self.strategy {
            SeedingStrategy::SharedStream => {
                let mut index = 0;
                for definition in self.registry.iter().take(position + 1) {
                    index = draws.next(definition)?;
                }
                index
            }
            SeedingStrategy::PerExperiment => {
                draws.next(self.registry.find(experiment_type)?)?
            }
        };

        debug!(
            identity = %identity,
            experiment_type = %experiment_type,
            index,
            "Resolved experiment variation"
        );

        Ok(index)
    }
}

/// Random source for one identity under a seeding strategy
enum Draws<'a> {
    Shared(StdRng),
    PerExperiment { identity: &'a str },
}

impl<'a> Draws<'a> {
    fn new(strategy: SeedingStrategy, identity: &'a str) -> Result<Self, DomainError> {
        match strategy {
            SeedingStrategy::SharedStream => Ok(Self::Shared(seeded_rng(derive_seed(identity)?))),
            SeedingStrategy::PerExperiment => Ok(Self::PerExperiment { identity }),
        }
    }

    fn next<V>(&mut self, definition: &ExperimentDefinition<V>) -> Result<usize, DomainError> {
        match self {
            Self::Shared(rng) => select_variation(rng, definition),
            Self::PerExperiment { identity } => {
                let seed = derive_experiment_seed(definition.experiment_type(), *identity)?;
                select_variation(&mut seeded_rng(seed), definition)
            }
        }
    }
}
