//! # percolation
//!
//! Monte Carlo estimation of the site-percolation threshold on n-by-n grids.
//!
//! Sites of a square grid are opened one at a time in uniformly random order
//! until an open path of 4-adjacent sites joins the top row to the bottom
//! row. The open fraction at that moment, averaged over many trials,
//! estimates the critical probability p* ≈ 0.5927.
//!
//! ## Modules
//!
//! - [`collections`]: Union-find forest with path compression and union by size
//! - [`grid`]: The [`Percolation`] model, tracking open, full, and percolating state
//! - [`random`]: Seeded generators and rejection sampling of closed sites
//! - [`stats`]: Compensated mean, Welford variance, confidence intervals
//! - [`estimator`]: [`ThresholdEstimator`], sequential or parallel over trials
//! - [`error`]: [`PercolationError`]
//!
//! ## Design Philosophy
//!
//! - **No backwash**: fullness is answered by a second union-find that never
//!   sees the virtual bottom, so percolation cannot make bottom-row sites
//!   spuriously full
//! - **Errors, not panics**: every out-of-range coordinate or index is
//!   reported through [`error::Result`]
//! - **Reproducible**: every random choice flows from an explicit seed
//! - **Property-based testing**: connectivity is cross-checked against a
//!   brute-force flood fill via proptest

pub mod collections;
pub mod error;
pub mod estimator;
pub mod grid;
pub mod random;
pub mod stats;

pub use error::PercolationError;
pub use estimator::{EstimatorConfig, ThresholdEstimator};
pub use grid::Percolation;
