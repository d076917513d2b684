//! Seeded random sources and random site selection.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use rand::Rng;

use crate::error::Result;
use crate::grid::Percolation;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
/// The sequence is deterministic for a given seed on the same platform.
///
/// # Examples
/// ```
/// use percolation::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Source of uniformly distributed grid coordinates.
///
/// Every [`rand::Rng`] is a `SiteSource`.
pub trait SiteSource {
    /// Returns an integer drawn uniformly from `lo..=hi`.
    ///
    /// Callers guarantee `lo <= hi`.
    fn uniform(&mut self, lo: usize, hi: usize) -> usize;
}

impl<R: Rng + ?Sized> SiteSource for R {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        self.random_range(lo..=hi)
    }
}

/// Picks a uniformly random closed site of `grid` by rejection sampling.
///
/// Draws `(row, col)` uniformly from `[1, n]²` until a closed site comes
/// up. The expected number of draws is `n² / closed`, which stays small
/// for as long as a trial runs before percolation.
///
/// # Returns
/// - `Ok(None)` if every site is already open.
///
/// # Examples
/// ```
/// use percolation::Percolation;
/// use percolation::random::{create_rng, random_closed_site};
///
/// let mut grid = Percolation::new(2)?;
/// let mut rng = create_rng(7);
/// while let Some((row, col)) = random_closed_site(&grid, &mut rng)? {
///     assert!(!grid.is_open(row, col)?);
///     grid.open(row, col)?;
/// }
/// assert_eq!(grid.number_of_open_sites(), 4);
/// # Ok::<(), percolation::error::PercolationError>(())
/// ```
pub fn random_closed_site<S: SiteSource + ?Sized>(
    grid: &Percolation,
    source: &mut S,
) -> Result<Option<(usize, usize)>> {
    if grid.number_of_open_sites() == grid.site_count() {
        return Ok(None);
    }
    let n = grid.size();
    loop {
        let row = source.uniform(1, n);
        let col = source.uniform(1, n);
        if !grid.is_open(row, col)? {
            return Ok(Some((row, col)));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
