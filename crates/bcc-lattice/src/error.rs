//! Error types for lattice configuration and indexing.

use thiserror::Error;

/// Result type alias for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors that can occur while building a lattice or indexing into it.
///
/// Variants fall into two kinds. Configuration errors are raised while
/// building a [`LatticeConfig`](crate::LatticeConfig) and abort construction
/// entirely. Domain errors are raised per point by
/// [`LatticeIndexer`](crate::LatticeIndexer).
///
/// # Example
///
/// ```
/// use bcc_lattice::{LatticeConfig, LatticeError};
///
/// let err = LatticeConfig::new(vec![4, 4]).unwrap_err();
/// assert!(matches!(err, LatticeError::TooFewDimensions { ndim: 2 }));
/// assert!(err.is_config_error());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// No cell counts were given.
    #[error("sizes must be specified and non-empty")]
    EmptySizes,

    /// The lattice has fewer than three axes.
    #[error("sizes must have shape (ndim >= 3,), got ndim = {ndim}")]
    TooFewDimensions {
        /// Number of axes supplied.
        ndim: usize,
    },

    /// A cell count is zero.
    #[error("size along axis {axis} must be positive, got {size}")]
    NonPositiveSize {
        /// Offending axis.
        axis: usize,
        /// The supplied cell count.
        size: u64,
    },

    /// A per-axis array does not have one entry per axis.
    #[error("{field} must have {expected} entries, got {actual}")]
    ShapeMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Number of axes of the lattice.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },

    /// A bound is NaN or infinite.
    #[error("{field}[{axis}] must be finite, got {value}")]
    NonFiniteBound {
        /// Which bound (`lower` or `upper`).
        field: &'static str,
        /// Offending axis.
        axis: usize,
        /// The supplied value.
        value: f64,
    },

    /// The lower bound is not strictly below the upper bound.
    #[error("lower >= upper on axis {axis}: lower = {lower}, upper = {upper}")]
    InvalidBounds {
        /// Offending axis.
        axis: usize,
        /// Lower bound on that axis.
        lower: f64,
        /// Upper bound on that axis.
        upper: f64,
    },

    /// An explicit cell width is not finite and positive.
    #[error("width along axis {axis} must be finite and positive, got {width}")]
    InvalidWidth {
        /// Offending axis.
        axis: usize,
        /// The supplied width.
        width: f64,
    },

    /// The packed cell ids would not fit in 64 bits.
    #[error("padded index space is too large for 64-bit cell ids")]
    IndexSpaceOverflow,

    /// A point or output buffer has the wrong number of coordinates.
    #[error("expected {expected} coordinates, got {actual}")]
    DimensionMismatch {
        /// Number of axes of the lattice.
        expected: usize,
        /// Number of coordinates supplied.
        actual: usize,
    },

    /// A point's cell falls outside the padded index space (strict mode only).
    ///
    /// Corner cells in the outer half of the lower padding need index `-1`
    /// after the padding shift, so a point can be rejected while still inside
    /// `[lower - width, upper + width]`.
    #[error(
        "coordinate {value} on axis {axis} falls in padded cell index {index}, outside 0..{padded_size}"
    )]
    OutsideDomain {
        /// First offending axis.
        axis: usize,
        /// The coordinate on that axis.
        value: f64,
        /// Cell index on that axis, after the padding shift.
        index: i64,
        /// Number of addressable cells on that axis.
        padded_size: u64,
    },

    /// A coordinate is NaN or infinite (strict mode only).
    #[error("coordinate {value} on axis {axis} is not finite")]
    NonFiniteCoordinate {
        /// First offending axis.
        axis: usize,
        /// The coordinate on that axis.
        value: f64,
    },

    /// A point in a batch failed.
    #[error("point {index}: {source}")]
    AtPoint {
        /// Position of the point in the batch.
        index: usize,
        /// The error raised for that point.
        #[source]
        source: Box<LatticeError>,
    },
}

impl LatticeError {
    /// Wrap an error with the batch position of the point that raised it.
    #[must_use]
    pub fn at_point(index: usize, source: Self) -> Self {
        Self::AtPoint {
            index,
            source: Box::new(source),
        }
    }

    /// Returns `true` for errors raised while building a configuration.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        match self {
            Self::EmptySizes
            | Self::TooFewDimensions { .. }
            | Self::NonPositiveSize { .. }
            | Self::ShapeMismatch { .. }
            | Self::NonFiniteBound { .. }
            | Self::InvalidBounds { .. }
            | Self::InvalidWidth { .. }
            | Self::IndexSpaceOverflow => true,
            Self::DimensionMismatch { .. }
            | Self::OutsideDomain { .. }
            | Self::NonFiniteCoordinate { .. } => false,
            Self::AtPoint { source, .. } => source.is_config_error(),
        }
    }

    /// Returns `true` for per-point errors raised while indexing.
    #[must_use]
    pub fn is_domain_error(&self) -> bool {
        !self.is_config_error()
    }

    /// Position of the failing point, if the error came from a batch.
    #[must_use]
    pub const fn point_index(&self) -> Option<usize> {
        match self {
            Self::AtPoint { index, .. } => Some(*index),
            _ => None,
        }
    }
}
