//! Connectivity data structures backing the percolation grid.
//!
//! # Available Structures
//!
//! - [`UnionFind`]: Disjoint-set forest with path compression and union by size

mod union_find;

pub use union_find::UnionFind;
