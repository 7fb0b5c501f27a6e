use clap::Parser;
use ab_suite::cli::{self, Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Command::Suite(args) => cli::query::run_suite(config, args),
        Command::Resolve(args) => cli::query::run_resolve(config, args),
        Command::Seed(args) => cli::query::run_seed(config, args),
        Command::Distribution(args) => cli::distribution::run(config, args),
        Command::Check => cli::check::run(config),
    }
}
