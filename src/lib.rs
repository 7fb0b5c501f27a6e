//! AB Suite
//!
//! Deterministic experiment assignment:
//! - The same identity always gets the same variation, with no stored state
//! - Optional relative weights per variation
//! - Full-suite and single-experiment queries
//! - Request-scoped suite caching

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;
pub use domain::{
    Assigner, AssignmentContext, AssignmentSuite, DomainError, ExperimentDefinition, Registry,
    RegistryBuilder, SeedingStrategy,
};
pub use infrastructure::services::AssignmentService;

/// Build the assignment service described by the configuration
///
/// Registration stops at the first malformed experiment; callers should
/// treat that error as fatal, since skipping an entry would shift the
/// shared random stream for every experiment after it.
pub fn build_assignment_service(
    config: &AppConfig,
) -> Result<AssignmentService<String>, DomainError> {
    let mut builder =
        RegistryBuilder::new().with_duplicate_policy(config.assignment.duplicates);

    builder.register(config.definitions())?;

    Ok(AssignmentService::new(
        builder.build(),
        config.assignment.seeding,
    ))
}
