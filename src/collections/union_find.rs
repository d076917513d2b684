//! Disjoint-set (Union-Find) forest with range-checked operations.
//!
//! Maintains a partition of the elements `0..m` under monotonic merges.
//! Sets are never split.
//!
//! # Algorithm
//!
//! Uses **path compression** during `find` and **union by size** during
//! `union`, giving amortized O(α(m)) per operation, where α is the inverse
//! Ackermann function. Union by size alone bounds tree height by
//! ⌊log₂ m⌋, so `find` never walks more than ~20 links on a
//! million-element forest even before compression kicks in.
//!
//! # References
//!
//! - Tarjan (1975), "Efficiency of a Good but Not Linear Set Union Algorithm"
//! - Sedgewick & Wayne (2011), *Algorithms* 4th ed., §1.5 (weighted quick-union)

use crate::error::{PercolationError, Result};

/// Disjoint-set forest with path compression and union by size.
///
/// Every public operation validates its indices and reports
/// [`PercolationError::OutOfRange`] instead of panicking.
///
/// # Examples
/// ```
/// use percolation::collections::UnionFind;
///
/// let mut uf = UnionFind::new(5);
/// assert_eq!(uf.component_count(), 5);
///
/// uf.union(0, 1)?;
/// uf.union(2, 3)?;
/// assert!(uf.connected(0, 1)?);
/// assert!(!uf.connected(0, 2)?);
///
/// uf.union(1, 3)?;
/// assert!(uf.connected(0, 2)?); // transitivity
/// assert_eq!(uf.component_count(), 2);
///
/// assert!(uf.union(0, 5).is_err());
/// # Ok::<(), percolation::error::PercolationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    /// Creates `m` singleton sets `{0}, {1}, ..., {m-1}`.
    ///
    /// `m == 0` yields an empty forest on which every operation reports
    /// [`PercolationError::OutOfRange`]. The percolation grid always
    /// allocates at least two elements.
    ///
    /// # Complexity
    /// O(m)
    pub fn new(m: usize) -> Self {
        Self {
            parent: (0..m).collect(),
            size: vec![1; m],
            components: m,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative (root) of the set containing `x`.
    ///
    /// Every node on the path from `x` to the root is re-pointed directly
    /// at the root.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] if `x >= len()`.
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.check(x)?;
        Ok(self.root(x))
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// The root of the smaller tree is attached under the root of the
    /// larger one; ties go to `a`'s root.
    ///
    /// # Returns
    /// `Ok(true)` if the sets were distinct and are now merged, `Ok(false)`
    /// if `a` and `b` were already connected.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] if either index is `>= len()`.
    pub fn union(&mut self, a: usize, b: usize) -> Result<bool> {
        self.check(a)?;
        self.check(b)?;

        let root_a = self.root(a);
        let root_b = self.root(b);
        if root_a == root_b {
            return Ok(false);
        }

        let (big, small) = if self.size[root_a] >= self.size[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];

        self.components -= 1;
        Ok(true)
    }

    /// Returns `true` if `a` and `b` are in the same set.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] if either index is `>= len()`.
    pub fn connected(&mut self, a: usize, b: usize) -> Result<bool> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.root(a) == self.root(b))
    }

    /// Returns the number of disjoint sets.
    ///
    /// # Complexity
    /// O(1)
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Returns the size of the set containing `x`.
    ///
    /// # Errors
    /// [`PercolationError::OutOfRange`] if `x >= len()`.
    pub fn component_size(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(self.size[root])
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.parent.len() {
            Ok(())
        } else {
            Err(PercolationError::OutOfRange {
                index,
                len: self.parent.len(),
            })
        }
    }

    /// Two-pass find: locate the root, then compress the path behind it.
    fn root(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }
}
