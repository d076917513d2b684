//! The n-by-n percolation grid.
//!
//! Sites are addressed by 1-indexed `(row, col)` pairs, row 1 being the top.
//! Opening a site is the only mutation and it is irreversible.
//!
//! # Backwash
//!
//! Two union-find forests are maintained:
//!
//! - the *percolation* forest has a virtual top (index 0) joined to every
//!   open row-1 site and a virtual bottom (index `n² + 1`) joined to every
//!   open row-n site; `percolates` asks whether the two virtual nodes meet.
//! - the *fullness* forest has the virtual top only. `is_full` asks it.
//!
//! With a single forest, once the system percolates every open bottom-row
//! site would appear connected to the top through the virtual bottom,
//! even when its own cluster never reaches row 1.

use crate::collections::UnionFind;
use crate::error::{PercolationError, Result};

const VIRTUAL_TOP: usize = 0;

/// An n-by-n site-percolation model.
///
/// # Examples
/// ```
/// use percolation::Percolation;
///
/// let mut grid = Percolation::new(3)?;
/// grid.open(1, 2)?;
/// grid.open(2, 2)?;
/// assert!(grid.is_full(2, 2)?);
/// assert!(!grid.percolates());
///
/// grid.open(3, 2)?;
/// assert!(grid.percolates());
/// assert_eq!(grid.number_of_open_sites(), 3);
/// # Ok::<(), percolation::error::PercolationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Percolation {
    size: usize,
    open: Vec<bool>,
    open_count: usize,
    percolation: UnionFind,
    fullness: UnionFind,
    percolated: bool,
}

impl Percolation {
    /// Creates an `n`-by-`n` grid with every site closed.
    ///
    /// # Errors
    /// [`PercolationError::InvalidDimension`] if `n == 0`.
    ///
    /// # Complexity
    /// O(n²)
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(PercolationError::invalid_dimension("grid size", n));
        }
        let sites = n
            .checked_mul(n)
            .filter(|&s| s < usize::MAX - 1)
            .ok_or_else(|| PercolationError::invalid_dimension("grid size", n))?;

        Ok(Self {
            size: n,
            open: vec![false; sites],
            open_count: 0,
            percolation: UnionFind::new(sites + 2),
            fullness: UnionFind::new(sites + 1),
            percolated: false,
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of sites, `n²`.
    pub fn site_count(&self) -> usize {
        self.open.len()
    }

    /// Opens site `(row, col)` if it is not open already.
    ///
    /// The site is joined to each open 4-neighbour in both forests, to the
    /// virtual top in both forests when `row == 1`, and to the virtual
    /// bottom in the percolation forest only when `row == n`. Opening an
    /// already-open site changes nothing.
    ///
    /// # Errors
    /// [`PercolationError::SiteOutOfRange`] if `row` or `col` is outside
    /// `[1, n]`.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let site = self.site_index(row, col)?;
        if self.open[site] {
            return Ok(());
        }
        self.open[site] = true;
        self.open_count += 1;

        let element = site + 1;
        for neighbour in self.neighbours(row, col).into_iter().flatten() {
            if !self.open[neighbour] {
                continue;
            }
            self.percolation.union(element, neighbour + 1)?;
            self.fullness.union(element, neighbour + 1)?;
        }
        if row == 1 {
            self.percolation.union(element, VIRTUAL_TOP)?;
            self.fullness.union(element, VIRTUAL_TOP)?;
        }
        if row == self.size {
            let bottom = self.virtual_bottom();
            self.percolation.union(element, bottom)?;
        }
        tracing::trace!(row, col, open = self.open_count, "opened site");

        if !self.percolated {
            let bottom = self.virtual_bottom();
            if self.percolation.connected(VIRTUAL_TOP, bottom)? {
                self.percolated = true;
                tracing::debug!(
                    size = self.size,
                    open = self.open_count,
                    "grid percolates"
                );
            }
        }
        Ok(())
    }

    /// Returns `true` if site `(row, col)` has been opened.
    ///
    /// # Errors
    /// [`PercolationError::SiteOutOfRange`] if `row` or `col` is outside
    /// `[1, n]`.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let site = self.site_index(row, col)?;
        Ok(self.open[site])
    }

    /// Returns `true` if site `(row, col)` is open and joined to the top row
    /// through a chain of open neighbours.
    ///
    /// Never reports a site as full merely because the system percolates.
    ///
    /// # Errors
    /// [`PercolationError::SiteOutOfRange`] if `row` or `col` is outside
    /// `[1, n]`.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        let site = self.site_index(row, col)?;
        if !self.open[site] {
            return Ok(false);
        }
        self.fullness.connected(site + 1, VIRTUAL_TOP)
    }

    /// Number of open sites. O(1).
    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Fraction of the grid that is open, in `[0, 1]`.
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / self.site_count() as f64
    }

    /// Returns `true` if some open path joins the top row to the bottom row.
    ///
    /// Monotonic: once `true`, stays `true`. O(1); the answer is refreshed
    /// by every `open`.
    pub fn percolates(&self) -> bool {
        self.percolated
    }

    fn virtual_bottom(&self) -> usize {
        self.site_count() + 1
    }

    /// Row-major flat index of a 1-indexed site, without the virtual-top
    /// offset.
    fn site_index(&self, row: usize, col: usize) -> Result<usize> {
        if row == 0 || row > self.size || col == 0 || col > self.size {
            return Err(PercolationError::SiteOutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok((row - 1) * self.size + (col - 1))
    }

    /// Flat indices of the in-grid 4-neighbours of `(row, col)`: up, down,
    /// left, right.
    fn neighbours(&self, row: usize, col: usize) -> [Option<usize>; 4] {
        let n = self.size;
        [
            (row > 1).then(|| (row - 2) * n + (col - 1)),
            (row < n).then(|| row * n + (col - 1)),
            (col > 1).then(|| (row - 1) * n + (col - 2)),
            (col < n).then(|| (row - 1) * n + col),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_closed() {
        for n in 1..6 {
            let mut grid = Percolation::new(n).unwrap();
            assert_eq!(grid.size(), n);
            assert_eq!(grid.site_count(), n * n);
            assert_eq!(grid.number_of_open_sites(), 0);
            assert!(!grid.percolates());
            for row in 1..=n {
                for col in 1..=n {
                    assert_eq!(grid.is_open(row, col), Ok(false));
                    assert_eq!(grid.is_full(row, col), Ok(false));
                }
            }
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            Percolation::new(0).unwrap_err(),
            PercolationError::InvalidDimension {
                what: "grid size",
                value: 0
            }
        );
    }

    #[test]
    fn test_single_site() {
        let mut grid = Percolation::new(1).unwrap();
        assert!(!grid.percolates());
        grid.open(1, 1).unwrap();
        assert!(grid.percolates());
        assert_eq!(grid.is_full(1, 1), Ok(true));
        assert_eq!(grid.number_of_open_sites(), 1);
    }

    #[test]
    fn test_single_site_bounds() {
        let mut grid = Percolation::new(1).unwrap();
        for (row, col) in [(0, 1), (1, 0), (2, 1), (1, 2), (0, 0)] {
            let err = PercolationError::SiteOutOfRange { row, col, size: 1 };
            assert_eq!(grid.open(row, col), Err(err.clone()));
            assert_eq!(grid.is_open(row, col), Err(err.clone()));
            assert_eq!(grid.is_full(row, col), Err(err));
        }
        assert_eq!(grid.number_of_open_sites(), 0);
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut grid = Percolation::new(4).unwrap();
        grid.open(2, 3).unwrap();
        grid.open(2, 3).unwrap();
        assert_eq!(grid.number_of_open_sites(), 1);
        assert_eq!(grid.is_open(2, 3), Ok(true));
    }

    #[test]
    fn test_vertical_column_percolates() {
        let n = 5;
        let mut grid = Percolation::new(n).unwrap();
        for row in 1..=n {
            assert!(!grid.percolates());
            grid.open(row, 3).unwrap();
            assert_eq!(grid.is_full(row, 3), Ok(true));
        }
        assert!(grid.percolates());
        assert!((grid.open_fraction() - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_diagonal_does_not_connect() {
        let mut grid = Percolation::new(2).unwrap();
        grid.open(1, 1).unwrap();
        grid.open(2, 2).unwrap();
        assert!(!grid.percolates());
        assert_eq!(grid.is_full(2, 2), Ok(false));
        grid.open(2, 1).unwrap();
        assert!(grid.percolates());
        assert_eq!(grid.is_full(2, 2), Ok(true));
    }

    #[test]
    fn test_no_backwash() {
        // Column 1 percolates; (3,3) touches only the bottom row.
        let mut grid = Percolation::new(3).unwrap();
        grid.open(1, 1).unwrap();
        grid.open(2, 1).unwrap();
        grid.open(3, 1).unwrap();
        assert!(grid.percolates());

        grid.open(3, 3).unwrap();
        assert_eq!(grid.is_open(3, 3), Ok(true));
        assert_eq!(grid.is_full(3, 3), Ok(false));

        grid.open(2, 3).unwrap();
        assert_eq!(grid.is_full(2, 3), Ok(false));

        // Joining through the middle makes them genuinely full.
        grid.open(3, 2).unwrap();
        assert_eq!(grid.is_full(3, 3), Ok(true));
        assert_eq!(grid.is_full(2, 3), Ok(true));
    }

    #[test]
    fn test_closed_site_is_never_full() {
        let mut grid = Percolation::new(3).unwrap();
        grid.open(1, 2).unwrap();
        grid.open(2, 1).unwrap();
        grid.open(2, 3).unwrap();
        // (2,2) is surrounded by open sites but closed itself
        assert_eq!(grid.is_full(2, 2), Ok(false));
        assert_eq!(grid.is_full(2, 1), Ok(false));
    }

    #[test]
    fn test_fully_open_grid_percolates() {
        for n in 1..8 {
            let mut grid = Percolation::new(n).unwrap();
            for row in (1..=n).rev() {
                for col in 1..=n {
                    grid.open(row, col).unwrap();
                }
            }
            assert!(grid.percolates());
            assert_eq!(grid.number_of_open_sites(), n * n);
            assert_eq!(grid.open_fraction(), 1.0);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    /// Breadth-first flood from every open top-row site.
    fn flood_from_top(n: usize, open: &[bool]) -> Vec<bool> {
        let mut reached = vec![false; n * n];
        let mut queue = VecDeque::new();
        for col in 0..n {
            if open[col] {
                reached[col] = true;
                queue.push_back(col);
            }
        }
        while let Some(site) = queue.pop_front() {
            let (r, c) = (site / n, site % n);
            let mut neighbours = Vec::with_capacity(4);
            if r > 0 {
                neighbours.push(site - n);
            }
            if r + 1 < n {
                neighbours.push(site + n);
            }
            if c > 0 {
                neighbours.push(site - 1);
            }
            if c + 1 < n {
                neighbours.push(site + 1);
            }
            for next in neighbours {
                if open[next] && !reached[next] {
                    reached[next] = true;
                    queue.push_back(next);
                }
            }
        }
        reached
    }

    fn open_sequence() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1_usize..=6).prop_flat_map(|n| {
            (
                Just(n),
                proptest::collection::vec((1..=n, 1..=n), 0..=n * n * 2),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn matches_brute_force_flood((n, opens) in open_sequence()) {
            let mut grid = Percolation::new(n).unwrap();
            let mut open = vec![false; n * n];

            for &(row, col) in &opens {
                grid.open(row, col).unwrap();
                open[(row - 1) * n + (col - 1)] = true;

                let reached = flood_from_top(n, &open);
                let expected = (0..n).any(|col| reached[(n - 1) * n + col]);
                prop_assert_eq!(grid.percolates(), expected);
                prop_assert_eq!(
                    grid.number_of_open_sites(),
                    open.iter().filter(|&&o| o).count()
                );
            }

            let reached = flood_from_top(n, &open);
            for row in 1..=n {
                for col in 1..=n {
                    let site = (row - 1) * n + (col - 1);
                    prop_assert_eq!(grid.is_open(row, col).unwrap(), open[site]);
                    prop_assert_eq!(
                        grid.is_full(row, col).unwrap(),
                        reached[site],
                        "site ({}, {}) fullness disagrees with flood fill", row, col
                    );
                }
            }
        }

        #[test]
        fn fullness_is_monotonic((n, opens) in open_sequence()) {
            let mut grid = Percolation::new(n).unwrap();
            let mut was_full = vec![false; n * n];
            let mut was_percolating = false;

            for &(row, col) in &opens {
                grid.open(row, col).unwrap();
                for r in 1..=n {
                    for c in 1..=n {
                        let full = grid.is_full(r, c).unwrap();
                        let site = (r - 1) * n + (c - 1);
                        prop_assert!(full || !was_full[site]);
                        was_full[site] = full;
                    }
                }
                prop_assert!(grid.percolates() || !was_percolating);
                was_percolating = grid.percolates();
            }
        }
    }
}
