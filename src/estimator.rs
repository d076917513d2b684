//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial opens uniformly random closed sites of a fresh grid until it
//! percolates and records the open fraction at that moment. The estimate is
//! the sample mean over trials, with a 95% normal confidence interval.
//!
//! Trials are independent. [`ThresholdEstimator::from_config`] gives trial
//! `i` its own generator seeded with `base_seed + i`, so the samples do not
//! depend on whether the trials run sequentially or on the rayon pool.

use std::fmt;

use rayon::prelude::*;

use crate::error::{positive_dimension, PercolationError, Result};
use crate::grid::Percolation;
use crate::random::{create_rng, random_closed_site, SiteSource};
use crate::stats::{self, ConfidenceInterval, Z_95};

/// Parameters of an estimation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Side length of each trial grid.
    pub size: usize,
    /// Number of independent trials.
    pub trials: usize,
    /// Base seed; drawn from OS entropy when `None`.
    pub seed: Option<u64>,
    /// Run trials on the rayon thread pool.
    pub parallel: bool,
}

impl EstimatorConfig {
    /// Sequential, unseeded configuration.
    ///
    /// # Errors
    /// [`PercolationError::InvalidDimension`] if `size` or `trials` is 0.
    pub fn new(size: usize, trials: usize) -> Result<Self> {
        if size == 0 {
            return Err(PercolationError::invalid_dimension("grid size", size));
        }
        if trials == 0 {
            return Err(PercolationError::invalid_dimension("trial count", trials));
        }
        Ok(Self {
            size,
            trials,
            seed: None,
            parallel: false,
        })
    }

    /// Like [`EstimatorConfig::new`], for signed input such as CLI arguments.
    ///
    /// # Errors
    /// [`PercolationError::InvalidDimension`] if either value is `<= 0`.
    ///
    /// # Examples
    /// ```
    /// use percolation::EstimatorConfig;
    /// assert!(EstimatorConfig::try_new(20, 50).is_ok());
    /// assert!(EstimatorConfig::try_new(-5, 50).is_err());
    /// assert!(EstimatorConfig::try_new(20, 0).is_err());
    /// ```
    pub fn try_new(size: i64, trials: i64) -> Result<Self> {
        Self::new(
            positive_dimension("grid size", size)?,
            positive_dimension("trial count", trials)?,
        )
    }

    /// Fixes the base seed, making the run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Selects parallel (rayon) or sequential trial execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Runs one trial on a fresh `size`-by-`size` grid and returns the fraction
/// of sites open when it first percolates.
///
/// # Errors
/// [`PercolationError::InvalidDimension`] if `size == 0`.
///
/// # Examples
/// ```
/// use percolation::estimator::run_trial;
/// use percolation::random::create_rng;
///
/// let fraction = run_trial(10, &mut create_rng(3))?;
/// assert!(fraction > 0.0 && fraction <= 1.0);
/// # Ok::<(), percolation::error::PercolationError>(())
/// ```
pub fn run_trial<S: SiteSource + ?Sized>(size: usize, source: &mut S) -> Result<f64> {
    let mut grid = Percolation::new(size)?;
    while !grid.percolates() {
        match random_closed_site(&grid, source)? {
            Some((row, col)) => grid.open(row, col)?,
            // A fully open grid always percolates.
            None => break,
        }
    }
    Ok(grid.open_fraction())
}

/// Threshold estimate over a fixed number of trials.
///
/// All statistics are computed once, at construction.
///
/// # Examples
/// ```
/// use percolation::{EstimatorConfig, ThresholdEstimator};
///
/// let config = EstimatorConfig::new(20, 30)?.with_seed(42);
/// let estimate = ThresholdEstimator::from_config(&config)?;
/// assert!(estimate.confidence_lo() <= estimate.mean());
/// assert!(estimate.mean() <= estimate.confidence_hi());
/// # Ok::<(), percolation::error::PercolationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ThresholdEstimator {
    size: usize,
    samples: Vec<f64>,
    mean: f64,
    stddev: f64,
    interval: ConfidenceInterval,
}

impl ThresholdEstimator {
    /// Runs `trials` sequential trials on `size`-by-`size` grids, seeded
    /// from OS entropy.
    ///
    /// # Errors
    /// [`PercolationError::InvalidDimension`] if `size` or `trials` is 0.
    pub fn new(size: usize, trials: usize) -> Result<Self> {
        Self::from_config(&EstimatorConfig::new(size, trials)?)
    }

    /// Runs every trial against one caller-supplied coordinate source.
    ///
    /// # Errors
    /// [`PercolationError::InvalidDimension`] if `size` or `trials` is 0.
    pub fn with_source<S: SiteSource + ?Sized>(
        size: usize,
        trials: usize,
        source: &mut S,
    ) -> Result<Self> {
        let config = EstimatorConfig::new(size, trials)?;
        let samples = (0..config.trials)
            .map(|_| run_trial(config.size, source))
            .collect::<Result<Vec<_>>>()?;
        Self::from_samples(config.size, samples)
    }

    /// Runs the trials described by `config`.
    ///
    /// # Errors
    /// [`PercolationError::InvalidDimension`] if `config.size` or
    /// `config.trials` is 0.
    pub fn from_config(config: &EstimatorConfig) -> Result<Self> {
        if config.size == 0 {
            return Err(PercolationError::invalid_dimension("grid size", config.size));
        }
        if config.trials == 0 {
            return Err(PercolationError::invalid_dimension(
                "trial count",
                config.trials,
            ));
        }

        let base_seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(
            size = config.size,
            trials = config.trials,
            seed = base_seed,
            parallel = config.parallel,
            "estimating percolation threshold"
        );

        let size = config.size;
        let trial = |index: usize| -> Result<f64> {
            let mut rng = create_rng(base_seed.wrapping_add(index as u64));
            let fraction = run_trial(size, &mut rng)?;
            tracing::debug!(trial = index, fraction, "trial finished");
            Ok(fraction)
        };

        let samples = if config.parallel {
            (0..config.trials)
                .into_par_iter()
                .map(trial)
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..config.trials)
                .map(trial)
                .collect::<Result<Vec<_>>>()?
        };

        Self::from_samples(size, samples)
    }

    fn from_samples(size: usize, samples: Vec<f64>) -> Result<Self> {
        let mean = stats::mean(&samples).ok_or_else(|| {
            match samples.iter().position(|s| !s.is_finite()) {
                Some(trial) => PercolationError::NonFiniteSample { trial },
                None => PercolationError::invalid_dimension("trial count", samples.len()),
            }
        })?;
        // Undefined for a single trial; NaN propagates into the interval.
        let stddev = stats::std_dev(&samples).unwrap_or(f64::NAN);
        let interval = ConfidenceInterval::normal(mean, stddev, samples.len(), Z_95);

        tracing::info!(
            size,
            trials = samples.len(),
            mean,
            stddev,
            lo = interval.lo,
            hi = interval.hi,
            "estimate complete"
        );

        Ok(Self {
            size,
            samples,
            mean,
            stddev,
            interval,
        })
    }

    /// Sample mean of the percolation threshold.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (Bessel-corrected); NaN for one trial.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.interval.lo
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.interval.hi
    }

    /// Per-trial open fractions, in trial order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Side length of the trial grids.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of trials run.
    pub fn trials(&self) -> usize {
        self.samples.len()
    }
}

impl fmt::Display for ThresholdEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24}= {:.16}", "mean", self.mean)?;
        writeln!(f, "{:<24}= {:.16}", "stddev", self.stddev)?;
        writeln!(
            f,
            "{:<24}= [{:.16}, {:.16}]",
            "95% confidence interval", self.interval.lo, self.interval.hi
        )
    }
}
