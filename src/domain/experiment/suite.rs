//! Assignment suite: one chosen variation index per experiment type

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The variation index chosen for every registered experiment, for one identity
///
/// Suites are computed fresh on every request to the generator and are never
/// persisted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentSuite {
    assignments: BTreeMap<String, usize>,
}

impl AssignmentSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an assignment unless the type already has one
    ///
    /// Returns `false` when the type was already present, which only happens
    /// for duplicate registrations; the first definition keeps its entry.
    pub fn record(&mut self, experiment_type: &str, index: usize) -> bool {
        if self.assignments.contains_key(experiment_type) {
            return false;
        }
        self.assignments.insert(experiment_type.to_string(), index);
        true
    }

    /// Get the index assigned for an experiment type
    pub fn get(&self, experiment_type: &str) -> Option<usize> {
        self.assignments.get(experiment_type).copied()
    }

    pub fn contains(&self, experiment_type: &str) -> bool {
        self.assignments.contains_key(experiment_type)
    }

    /// Iterate `(type, index)` pairs sorted by type
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.assignments.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl FromIterator<(String, usize)> for AssignmentSuite {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        let mut suite = Self::new();
        for (experiment_type, index) in iter {
            suite.record(&experiment_type, index);
        }
        suite
    }
}
