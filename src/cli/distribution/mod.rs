//! Distribution command - checks how identities spread over variations

use std::path::Path;

use anyhow::ensure;
use clap::Args;
use tracing::warn;

use super::{bootstrap, print_json};

/// Arguments for the distribution command
#[derive(Args, Clone)]
pub struct DistributionArgs {
    /// Experiment type
    pub experiment_type: String,

    /// Number of identities to sample
    #[arg(long, default_value_t = 10_000)]
    pub samples: usize,

    /// Prefix for the sampled identities `<prefix>0 .. <prefix>N-1`
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Significance level used to flag deviations
    #[arg(long, default_value_t = 0.01)]
    pub alpha: f64,
}

pub fn run(config: Option<&Path>, args: DistributionArgs) -> anyhow::Result<()> {
    ensure!(args.samples > 0, "--samples must be positive");
    ensure!(
        args.alpha > 0.0 && args.alpha < 1.0,
        "--alpha must be between 0 and 1"
    );

    let service = bootstrap(config)?;
    let identities = (0..args.samples).map(|i| format!("{}{}", args.prefix, i));
    let report = service.distribution(&args.experiment_type, identities)?;

    if !report.is_consistent(args.alpha) {
        warn!(
            experiment_type = %args.experiment_type,
            alpha = args.alpha,
            "Observed distribution deviates from the configured weights"
        );
    }

    print_json(&report)
}
