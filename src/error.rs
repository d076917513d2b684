//! Error types for grid construction and site access.

use thiserror::Error;

/// Result type for percolation operations.
pub type Result<T> = std::result::Result<T, PercolationError>;

/// Contract violations raised by the grid, the union-find, and the estimator.
///
/// None of these occur under correct usage; they are surfaced at the point
/// of the offending call and never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PercolationError {
    /// A grid size or trial count that is not strictly positive.
    #[error("invalid {what}: {value} (must be > 0)")]
    InvalidDimension {
        /// Which quantity was rejected, e.g. `"grid size"`.
        what: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// A 1-indexed site coordinate outside `[1, size]`.
    #[error("site ({row}, {col}) is outside the {size}x{size} grid")]
    SiteOutOfRange { row: usize, col: usize, size: usize },

    /// A union-find element index outside `[0, len)`.
    #[error("element {index} is out of range for {len} elements")]
    OutOfRange { index: usize, len: usize },

    /// A trial produced a NaN or infinite open fraction.
    #[error("trial {trial} produced a non-finite sample")]
    NonFiniteSample { trial: usize },
}

impl PercolationError {
    pub(crate) fn invalid_dimension(what: &'static str, value: usize) -> Self {
        PercolationError::InvalidDimension {
            what,
            value: i64::try_from(value).unwrap_or(i64::MAX),
        }
    }
}

/// Validates a signed dimension coming from an untyped boundary (CLI, FFI).
///
/// # Errors
/// [`PercolationError::InvalidDimension`] if `value <= 0`.
///
/// # Examples
/// ```
/// use percolation::error::{positive_dimension, PercolationError};
/// assert_eq!(positive_dimension("grid size", 20), Ok(20));
/// assert!(matches!(
///     positive_dimension("grid size", -5),
///     Err(PercolationError::InvalidDimension { value: -5, .. })
/// ));
/// ```
pub fn positive_dimension(what: &'static str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(PercolationError::InvalidDimension { what, value });
    }
    usize::try_from(value).map_err(|_| PercolationError::InvalidDimension { what, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_dimension_accepts_positive() {
        assert_eq!(positive_dimension("trial count", 1), Ok(1));
    }

    #[test]
    fn test_positive_dimension_rejects_zero_and_negative() {
        assert_eq!(
            positive_dimension("grid size", 0),
            Err(PercolationError::InvalidDimension {
                what: "grid size",
                value: 0
            })
        );
        assert!(positive_dimension("grid size", -5).is_err());
    }

    #[test]
    fn test_display_messages() {
        let e = PercolationError::SiteOutOfRange {
            row: 0,
            col: 3,
            size: 5,
        };
        assert_eq!(e.to_string(), "site (0, 3) is outside the 5x5 grid");

        let e = PercolationError::OutOfRange { index: 7, len: 4 };
        assert_eq!(e.to_string(), "element 7 is out of range for 4 elements");

        let e = PercolationError::NonFiniteSample { trial: 3 };
        assert_eq!(e.to_string(), "trial 3 produced a non-finite sample");

        let e = PercolationError::invalid_dimension("trial count", 0);
        assert_eq!(e.to_string(), "invalid trial count: 0 (must be > 0)");
    }
}
