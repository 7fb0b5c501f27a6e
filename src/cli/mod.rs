//! CLI module for AB Suite
//!
//! Provides subcommands for querying assignments from a configured
//! experiment set:
//! - `suite`: full assignment suite for an identity
//! - `resolve`: one experiment for an identity
//! - `seed`: the digest and seed derived from an identity
//! - `distribution`: spread of a sample of identities over variations
//! - `check`: validate configuration and list experiments

pub mod check;
pub mod distribution;
pub mod query;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::services::AssignmentService;

/// AB Suite - deterministic experiment assignment
#[derive(Parser)]
#[command(name = "ab-suite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file, layered over config/default and config/local
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the full assignment suite for an identity as JSON
    Suite(query::SuiteArgs),

    /// Resolve one experiment for an identity
    Resolve(query::ResolveArgs),

    /// Print the digest and seed derived from an identity
    Seed(query::SeedArgs),

    /// Report how sampled identities spread over an experiment's variations
    Distribution(distribution::DistributionArgs),

    /// Validate configuration and list registered experiments
    Check,
}

/// Load configuration and start logging
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load_from(path).context("failed to load configuration")?;
    logging::init_logging(&config.logging).context("failed to initialize logging")?;

    Ok(config)
}

/// Load configuration and register every configured experiment
pub(crate) fn bootstrap(path: Option<&Path>) -> anyhow::Result<AssignmentService<String>> {
    let config = load_config(path)?;
    let service =
        crate::build_assignment_service(&config).context("invalid experiment configuration")?;

    Ok(service)
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
