//! Infrastructure layer for experiment assignment
//!
//! Seed derivation, weighted selection, suite generation and distribution
//! statistics.

mod generator;
mod seed;
mod selector;
mod statistical;

pub use generator::SuiteGenerator;
pub use seed::{derive_experiment_seed, derive_seed, identity_digest, seeded_rng};
pub use selector::{pick_weighted, select_variation};
pub use statistical::{binomial_z_score, build_distribution_report, two_tailed_p_value};
