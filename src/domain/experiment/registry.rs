//! Ordered, write-once collection of experiment definitions
//!
//! A [`RegistryBuilder`] validates definitions as they are inserted and then
//! freezes them into an immutable [`Registry`]. Insertion order is part of the
//! assignment contract under the shared-stream seeding strategy, so it is
//! preserved exactly.

use std::collections::HashMap;

use tracing::warn;

use super::entity::{DuplicatePolicy, ExperimentDefinition};
use super::validation::ExperimentValidationError;
use crate::domain::DomainError;

/// Immutable, ordered set of experiment definitions
#[derive(Debug, Clone)]
pub struct Registry<V> {
    definitions: Vec<ExperimentDefinition<V>>,
    /// First position of each type in `definitions`
    positions: HashMap<String, usize>,
}

impl<V> Registry<V> {
    /// Start building a registry with the default duplicate policy
    pub fn builder() -> RegistryBuilder<V> {
        RegistryBuilder::new()
    }

    /// Find a definition by type; with duplicates the first registered wins
    pub fn find(&self, experiment_type: &str) -> Result<&ExperimentDefinition<V>, DomainError> {
        let position = self.position(experiment_type)?;
        Ok(&self.definitions[position])
    }

    /// Registration position of the first definition with this type
    pub fn position(&self, experiment_type: &str) -> Result<usize, DomainError> {
        self.positions
            .get(experiment_type)
            .copied()
            .ok_or_else(|| DomainError::unknown_experiment(experiment_type))
    }

    pub fn contains(&self, experiment_type: &str) -> bool {
        self.positions.contains_key(experiment_type)
    }

    /// Iterate definitions in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, ExperimentDefinition<V>> {
        self.definitions.iter()
    }

    /// Distinct experiment types in registration order
    pub fn experiment_types(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .enumerate()
            .filter(|(i, d)| self.positions.get(d.experiment_type()) == Some(i))
            .map(|(_, d)| d.experiment_type())
            .collect()
    }

    /// Number of registered definitions, duplicates included
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a, V> IntoIterator for &'a Registry<V> {
    type Item = &'a ExperimentDefinition<V>;
    type IntoIter = std::slice::Iter<'a, ExperimentDefinition<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects and validates definitions before freezing them into a [`Registry`]
#[derive(Debug)]
pub struct RegistryBuilder<V> {
    definitions: Vec<ExperimentDefinition<V>>,
    positions: HashMap<String, usize>,
    duplicate_policy: DuplicatePolicy,
}

impl<V> RegistryBuilder<V> {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            positions: HashMap::new(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// Set how repeated experiment types are handled
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Validate and append one definition
    ///
    /// A rejected definition is not inserted.
    pub fn insert(&mut self, definition: ExperimentDefinition<V>) -> Result<(), DomainError> {
        definition.validate()?;

        let experiment_type = definition.experiment_type();

        if self.positions.contains_key(experiment_type) {
            match self.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(
                        ExperimentValidationError::DuplicateType(experiment_type.to_string())
                            .into(),
                    );
                }
                DuplicatePolicy::FirstWins => {
                    warn!(
                        experiment_type = %experiment_type,
                        "Duplicate experiment type registered; lookups resolve to the first"
                    );
                }
            }
        } else {
            self.positions
                .insert(experiment_type.to_string(), self.definitions.len());
        }

        self.definitions.push(definition);
        Ok(())
    }

    /// Insert definitions in order, stopping at the first malformed entry
    pub fn register(
        &mut self,
        definitions: impl IntoIterator<Item = ExperimentDefinition<V>>,
    ) -> Result<(), DomainError> {
        for definition in definitions {
            self.insert(definition)?;
        }
        Ok(())
    }

    /// Builder-style variant of [`RegistryBuilder::insert`]
    pub fn with_definition(mut self, definition: ExperimentDefinition<V>) -> Result<Self, DomainError> {
        self.insert(definition)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Freeze the registry
    pub fn build(self) -> Registry<V> {
        Registry {
            definitions: self.definitions,
            positions: self.positions,
        }
    }
}

impl<V> Default for RegistryBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Registry<&'static str> {
        let mut builder = Registry::builder();
        builder
            .register(vec![
                ExperimentDefinition::new("menu-order", vec!["h1"]),
                ExperimentDefinition::new("mailing-list", vec!["h1", "h2"]),
                ExperimentDefinition::new("prob", vec!["h1", "h2", "h3"])
                    .with_weights(vec![0.5, 0.5, 0.01]),
            ])
            .unwrap();
        builder.build()
    }

    mod insertion {
        use super::*;

        #[test]
        fn test_preserves_order() {
            let registry = scenario();
            let types: Vec<_> = registry.iter().map(|d| d.experiment_type()).collect();
            assert_eq!(types, vec!["menu-order", "mailing-list", "prob"]);
            assert_eq!(registry.len(), 3);
            assert!(!registry.is_empty());
        }

        #[test]
        fn test_rejects_empty_type() {
            let mut builder = RegistryBuilder::new();
            let err = builder
                .insert(ExperimentDefinition::new("", vec![1]))
                .unwrap_err();
            assert_eq!(err, DomainError::Configuration(ExperimentValidationError::EmptyType));
            assert!(builder.is_empty());
        }

        #[test]
        fn test_rejects_empty_variations() {
            let mut builder = RegistryBuilder::<u8>::new();
            let err = builder
                .insert(ExperimentDefinition::new("exp", vec![]))
                .unwrap_err();
            assert!(err.is_configuration());
            assert!(builder.is_empty());
        }

        #[test]
        fn test_rejects_mismatched_weights() {
            let mut builder = RegistryBuilder::new();
            let err = builder
                .insert(ExperimentDefinition::new("exp", vec![1, 2]).with_weights(vec![1.0]))
                .unwrap_err();
            assert!(matches!(
                err,
                DomainError::Configuration(ExperimentValidationError::WeightCountMismatch { .. })
            ));
            assert!(builder.is_empty());
        }

        #[test]
        fn test_rejects_negative_and_zero_weights() {
            let mut builder = RegistryBuilder::new();
            assert!(builder
                .insert(ExperimentDefinition::new("neg", vec![1, 2]).with_weights(vec![1.0, -1.0]))
                .unwrap_err()
                .is_configuration());
            assert!(builder
                .insert(ExperimentDefinition::new("zero", vec![1, 2]).with_weights(vec![0.0, 0.0]))
                .unwrap_err()
                .is_configuration());
            assert!(builder.is_empty());
        }

        #[test]
        fn test_register_stops_at_first_failure() {
            let mut builder = RegistryBuilder::new();
            let result = builder.register(vec![
                ExperimentDefinition::new("a", vec![1]),
                ExperimentDefinition::new("", vec![1]),
                ExperimentDefinition::new("c", vec![1]),
            ]);
            assert!(result.is_err());
            assert_eq!(builder.len(), 1);
        }
    }

    mod lookup {
        use super::*;

        #[test]
        fn test_find() {
            let registry = scenario();
            let def = registry.find("prob").unwrap();
            assert_eq!(def.variation_count(), 3);
            assert_eq!(registry.position("mailing-list").unwrap(), 1);
            assert!(registry.contains("menu-order"));
        }

        #[test]
        fn test_unknown_type() {
            let registry = scenario();
            let err = registry.find("checkout").unwrap_err();
            assert_eq!(err, DomainError::unknown_experiment("checkout"));
            assert!(registry.position("checkout").is_err());
        }
    }

    mod duplicates {
        use super::*;

        #[test]
        fn test_rejected_by_default() {
            let mut builder = RegistryBuilder::new();
            builder.insert(ExperimentDefinition::new("exp", vec![1])).unwrap();
            let err = builder
                .insert(ExperimentDefinition::new("exp", vec![1, 2]))
                .unwrap_err();
            assert_eq!(
                err,
                DomainError::Configuration(ExperimentValidationError::DuplicateType(
                    "exp".to_string()
                ))
            );
            assert_eq!(builder.len(), 1);
        }

        #[test]
        fn test_first_wins() {
            let registry = RegistryBuilder::new()
                .with_duplicate_policy(DuplicatePolicy::FirstWins)
                .with_definition(ExperimentDefinition::new("exp", vec![1]))
                .and_then(|b| b.with_definition(ExperimentDefinition::new("other", vec![1])))
                .and_then(|b| b.with_definition(ExperimentDefinition::new("exp", vec![1, 2, 3])))
                .unwrap()
                .build();

            assert_eq!(registry.len(), 3);
            assert_eq!(registry.find("exp").unwrap().variation_count(), 1);
            assert_eq!(registry.position("exp").unwrap(), 0);
            assert_eq!(registry.experiment_types(), vec!["exp", "other"]);
        }
    }
}
