//! Query interface exposed to request-handling code

use super::suite::AssignmentSuite;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Deterministic variation assignment for identities
#[cfg_attr(test, automock)]
pub trait Assigner: Send + Sync {
    /// Compute the full suite for an identity
    fn compute_suite(&self, identity: &str) -> Result<AssignmentSuite, DomainError>;

    /// Resolve a single experiment; equivalent to one entry of the suite
    fn resolve(&self, experiment_type: &str, identity: &str) -> Result<usize, DomainError>;
}

/// Extracts the assignment identity from a caller-defined request type
pub trait IdentitySource<R: ?Sized>: Send + Sync {
    fn identity(&self, request: &R) -> String;
}

impl<R: ?Sized, F> IdentitySource<R> for F
where
    F: Fn(&R) -> String + Send + Sync,
{
    fn identity(&self, request: &R) -> String {
        self(request)
    }
}
