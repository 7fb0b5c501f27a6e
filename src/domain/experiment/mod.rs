//! Experiment domain module for A/B testing
//!
//! Types and traits for deterministically assigning identities to
//! experiment variations.

mod assigner;
mod context;
mod entity;
mod registry;
mod result;
mod suite;
mod validation;

pub use assigner::{Assigner, IdentitySource};
pub use context::AssignmentContext;
pub use entity::{DuplicatePolicy, ExperimentDefinition, SeedingStrategy};
pub use registry::{Registry, RegistryBuilder};
pub use result::{DistributionReport, VariationShare};
pub use suite::AssignmentSuite;
pub use validation::{
    validate_experiment_type, validate_shape, validate_weights, ExperimentValidationError,
};

#[cfg(test)]
pub use assigner::MockAssigner;
