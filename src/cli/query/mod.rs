//! Query commands - suite, resolve and seed

use std::path::Path;

use clap::Args;
use serde_json::json;

use super::{bootstrap, load_config, print_json};
use crate::infrastructure::experiment::{derive_seed, identity_digest};

/// Arguments for the suite command
#[derive(Args, Clone)]
pub struct SuiteArgs {
    /// Identity to assign, e.g. a user ID
    pub identity: String,
}

/// Arguments for the resolve command
#[derive(Args, Clone)]
pub struct ResolveArgs {
    /// Experiment type
    pub experiment_type: String,

    /// Identity to assign, e.g. a user ID
    pub identity: String,
}

/// Arguments for the seed command
#[derive(Args, Clone)]
pub struct SeedArgs {
    pub identity: String,
}

pub fn run_suite(config: Option<&Path>, args: SuiteArgs) -> anyhow::Result<()> {
    let service = bootstrap(config)?;
    let suite = service.compute_suite(&args.identity)?;
    print_json(&suite)
}

pub fn run_resolve(config: Option<&Path>, args: ResolveArgs) -> anyhow::Result<()> {
    let service = bootstrap(config)?;
    let (index, variation) = service.resolve_variation(&args.experiment_type, &args.identity)?;

    print_json(&json!({
        "type": args.experiment_type,
        "identity": args.identity,
        "index": index,
        "variation": variation,
    }))
}

pub fn run_seed(config: Option<&Path>, args: SeedArgs) -> anyhow::Result<()> {
    load_config(config)?;

    let digest = identity_digest(&args.identity);
    let seed = derive_seed(&args.identity)?;

    print_json(&json!({
        "identity": args.identity,
        "sha256": hex::encode(digest),
        "seed": seed,
    }))
}
