//! Domain layer - Core assignment entities and rules

pub mod error;
pub mod experiment;

pub use error::DomainError;
pub use experiment::{
    Assigner, AssignmentContext, AssignmentSuite, DuplicatePolicy, ExperimentDefinition,
    ExperimentValidationError, IdentitySource, Registry, RegistryBuilder, SeedingStrategy,
};
