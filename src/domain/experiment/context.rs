//! Request-scoped assignment context
//!
//! Computing a suite walks every registered experiment, so request handlers
//! that consult several experiments share one lazily computed suite through
//! an [`AssignmentContext`] instead of recomputing it per query.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use super::assigner::{Assigner, IdentitySource};
use super::suite::AssignmentSuite;
use crate::domain::DomainError;

/// Caches the assignment suite of one identity for the lifetime of a request
pub struct AssignmentContext {
    identity: String,
    assigner: Arc<dyn Assigner>,
    suite: OnceCell<AssignmentSuite>,
}

impl AssignmentContext {
    /// Create a context for a known identity
    pub fn new(identity: impl Into<String>, assigner: Arc<dyn Assigner>) -> Self {
        Self {
            identity: identity.into(),
            assigner,
            suite: OnceCell::new(),
        }
    }

    /// Create a context, deriving the identity from a request
    pub fn from_request<R: ?Sized>(
        request: &R,
        source: &dyn IdentitySource<R>,
        assigner: Arc<dyn Assigner>,
    ) -> Self {
        Self::new(source.identity(request), assigner)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Whether the suite has already been computed
    pub fn is_cached(&self) -> bool {
        self.suite.get().is_some()
    }

    /// Get the suite, computing it on first access
    ///
    /// A failed computation is not cached; the next call retries.
    pub fn suite(&self) -> Result<&AssignmentSuite, DomainError> {
        self.suite.get_or_try_init(|| {
            let suite = self.assigner.compute_suite(&self.identity)?;
            debug!(identity = %self.identity, experiments = suite.len(), "Cached assignment suite");
            Ok(suite)
        })
    }

    /// Get the variation index assigned for an experiment
    pub fn variation(&self, experiment_type: &str) -> Result<usize, DomainError> {
        self.suite()?
            .get(experiment_type)
            .ok_or_else(|| DomainError::unknown_experiment(experiment_type))
    }
}

impl fmt::Debug for AssignmentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssignmentContext")
            .field("identity", &self.identity)
            .field("suite", &self.suite.get())
            .finish()
    }
}
