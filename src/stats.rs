//! Sample statistics over per-trial percolation thresholds.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier-Kahan compensated summation, so error stays O(ε)
//!   no matter how many trials are summed.
//! - **Variance/StdDev**: Welford's online algorithm with Bessel's
//!   correction. Reference: Welford (1962), "Note on a Method for
//!   Calculating Corrected Sums of Squares and Products",
//!   *Technometrics* 4(3).
//! - **Confidence interval**: normal approximation,
//!   `mean ± z · s / √n` with `z = 1.96` for 95%.

/// Two-sided 95% critical value of the standard normal distribution.
pub const Z_95: f64 = 1.96;

/// Computes the arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::mean;
/// let v = [0.55, 0.60, 0.65];
/// assert!((mean(&v).unwrap() - 0.6).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Computes the sample variance (denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::variance;
/// let thresholds = [0.56, 0.58, 0.60, 0.62];
/// assert!((variance(&thresholds).unwrap() - 0.002 / 3.0).abs() < 1e-15);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    data.iter()
        .fold(WelfordAccumulator::default(), |mut acc, &x| {
            acc.update(x);
            acc
        })
        .sample_variance()
}

/// Computes the sample standard deviation, `sqrt(variance(data))`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Neumaier's improved Kahan summation.
///
/// Keeps a running compensation term so that the low-order bits lost in
/// each addition are recovered, including when the addend is larger in
/// magnitude than the running sum.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik und
/// Mechanik* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// A closed interval `[lo, hi]` around a sample mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    pub lo: f64,
    pub hi: f64,
}

impl ConfidenceInterval {
    /// Normal-approximation interval `mean ∓ z · std_dev / √n`.
    ///
    /// A NaN `std_dev` (single trial) yields NaN bounds.
    ///
    /// # Examples
    /// ```
    /// use percolation::stats::{ConfidenceInterval, Z_95};
    /// let ci = ConfidenceInterval::normal(0.5, 0.1, 4, Z_95);
    /// assert!((ci.lo - 0.402).abs() < 1e-12);
    /// assert!((ci.hi - 0.598).abs() < 1e-12);
    /// ```
    pub fn normal(mean: f64, std_dev: f64, n: usize, z: f64) -> Self {
        let half_width = z * std_dev / (n as f64).sqrt();
        Self {
            lo: mean - half_width,
            hi: mean + half_width,
        }
    }
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Welford's running mean and sum of squared deviations.
///
/// Avoids the catastrophic cancellation that `E[X²] − (E[X])²` suffers
/// when the samples cluster tightly, as percolation thresholds do.
#[derive(Debug, Default)]
struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Bessel-corrected; `None` below two samples.
    fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
