//! Percolation threshold estimator.
//!
//! Runs TRIALS independent experiments on N-by-N grids and prints the
//! sample mean, standard deviation, and 95% confidence interval of the
//! open-site fraction at which each grid first percolates.

use anyhow::{Context, Result};
use clap::Parser;
use percolation::{EstimatorConfig, ThresholdEstimator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "percolation-stats")]
#[command(about = "Estimate the site-percolation threshold by Monte Carlo simulation")]
struct Cli {
    /// Grid side length
    #[arg(allow_negative_numbers = true)]
    n: i64,

    /// Number of independent trials
    #[arg(allow_negative_numbers = true)]
    trials: i64,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials on all cores
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "percolation=info,percolation_stats=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = EstimatorConfig::try_new(cli.n, cli.trials)
        .context("invalid arguments")?
        .with_parallel(cli.parallel);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let estimate = ThresholdEstimator::from_config(&config).with_context(|| {
        format!(
            "failed to estimate threshold for n={} trials={}",
            config.size, config.trials
        )
    })?;

    print!("{estimate}");
    Ok(())
}
