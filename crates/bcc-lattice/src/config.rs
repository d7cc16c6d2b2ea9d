//! Lattice configuration: axis counts, box bounds and derived cell geometry.

use tracing::debug;

use crate::error::{LatticeError, LatticeResult};

/// Minimum number of axes for a BCC lattice.
pub const MIN_DIMENSIONS: usize = 3;

/// Cells of padding added on each side of every axis.
pub const PADDING: u64 = 1;

/// An immutable, validated description of a BCC lattice over an
/// axis-aligned box.
///
/// Holds the per-axis cell counts and box bounds together with the
/// quantities derived from them: the cell width, the padded axis sizes used
/// for packing (`sizes + 2`), and the mixed-radix strides over the padded
/// sizes.
///
/// A config is never mutated after it is built. To change any field, build a
/// new one.
///
/// # Example
///
/// ```
/// use bcc_lattice::LatticeConfig;
///
/// let config = LatticeConfig::builder(vec![4, 4, 4])
///     .with_bounds(vec![0.0; 3], vec![4.0; 3])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.ndim(), 3);
/// assert_eq!(config.width(), &[1.0, 1.0, 1.0]);
/// assert_eq!(config.padded_sizes(), &[6, 6, 6]);
/// assert_eq!(config.strides(), &[1, 6, 36]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "LatticeConfigBuilder")
)]
pub struct LatticeConfig {
    ndim: usize,
    sizes: Vec<u64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    width: Vec<f64>,
    padded_sizes: Vec<u64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    strides: Vec<u64>,
}

impl LatticeConfig {
    /// Builds a config over the unit box `[0, 1]^ndim`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `sizes` is empty, has fewer than
    /// three entries, or contains a zero.
    ///
    /// # Example
    ///
    /// ```
    /// use bcc_lattice::LatticeConfig;
    ///
    /// let config = LatticeConfig::new(vec![2, 4, 8]).unwrap();
    /// assert_eq!(config.lower(), &[0.0, 0.0, 0.0]);
    /// assert_eq!(config.upper(), &[1.0, 1.0, 1.0]);
    /// assert_eq!(config.width(), &[0.5, 0.25, 0.125]);
    /// ```
    pub fn new(sizes: impl Into<Vec<u64>>) -> LatticeResult<Self> {
        Self::builder(sizes).build()
    }

    /// Starts a builder for a lattice with the given per-axis cell counts.
    #[must_use]
    pub fn builder(sizes: impl Into<Vec<u64>>) -> LatticeConfigBuilder {
        LatticeConfigBuilder::new(sizes)
    }

    /// Number of spatial dimensions.
    #[must_use]
    pub const fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of cells along each axis, before padding.
    #[must_use]
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    /// Lower box bound on each axis.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper box bound on each axis.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Cell width along each axis.
    #[must_use]
    pub fn width(&self) -> &[f64] {
        &self.width
    }

    /// Axis sizes including one padding cell on each side (`sizes + 2`).
    #[must_use]
    pub fn padded_sizes(&self) -> &[u64] {
        &self.padded_sizes
    }

    /// Mixed-radix strides over [`padded_sizes`](Self::padded_sizes).
    ///
    /// `strides[0] == 1` and `strides[i] == strides[i - 1] * padded_sizes[i - 1]`.
    #[must_use]
    pub fn strides(&self) -> &[u64] {
        &self.strides
    }

    /// Size of the packed index space: the product of the padded sizes.
    #[must_use]
    pub fn cardinality(&self) -> u64 {
        // Checked at build time to fit, with room for the parity bit.
        self.padded_sizes.iter().product()
    }

    /// The padded box `[lower - width, upper + width]` on one axis.
    ///
    /// Returns `None` if `axis >= ndim`.
    #[must_use]
    pub fn padded_bounds(&self, axis: usize) -> Option<(f64, f64)> {
        let width = *self.width.get(axis)?;
        Some((self.lower[axis] - width, self.upper[axis] + width))
    }
}

impl TryFrom<LatticeConfigBuilder> for LatticeConfig {
    type Error = LatticeError;

    fn try_from(builder: LatticeConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

/// Builder for [`LatticeConfig`].
///
/// `sizes` is required. Bounds default to the unit box, and the width is
/// derived as `(upper - lower) / sizes` unless supplied explicitly, in which
/// case it is trusted as given.
///
/// # Example
///
/// ```
/// use bcc_lattice::{LatticeConfig, LatticeError};
///
/// let err = LatticeConfig::builder(vec![4, 4, 4])
///     .with_lower(vec![1.0, 1.0, 1.0])
///     .with_upper(vec![0.0, 1.0, 1.0])
///     .build()
///     .unwrap_err();
/// assert!(matches!(err, LatticeError::InvalidBounds { axis: 0, .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfigBuilder {
    sizes: Vec<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    ndim: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default))]
    lower: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default))]
    upper: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default))]
    width: Option<Vec<f64>>,
}

impl LatticeConfigBuilder {
    /// Creates a builder for a lattice with the given per-axis cell counts.
    #[must_use]
    pub fn new(sizes: impl Into<Vec<u64>>) -> Self {
        Self {
            sizes: sizes.into(),
            ndim: None,
            lower: None,
            upper: None,
            width: None,
        }
    }

    /// Sets the expected number of dimensions.
    ///
    /// Optional; when given it must equal the length of `sizes`.
    #[must_use]
    pub const fn with_ndim(mut self, ndim: usize) -> Self {
        self.ndim = Some(ndim);
        self
    }

    /// Sets the lower box bound (default: all zeros).
    #[must_use]
    pub fn with_lower(mut self, lower: impl Into<Vec<f64>>) -> Self {
        self.lower = Some(lower.into());
        self
    }

    /// Sets the upper box bound (default: all ones).
    #[must_use]
    pub fn with_upper(mut self, upper: impl Into<Vec<f64>>) -> Self {
        self.upper = Some(upper.into());
        self
    }

    /// Sets both box bounds.
    #[must_use]
    pub fn with_bounds(self, lower: impl Into<Vec<f64>>, upper: impl Into<Vec<f64>>) -> Self {
        self.with_lower(lower).with_upper(upper)
    }

    /// Sets an explicit cell width instead of deriving it from the bounds.
    #[must_use]
    pub fn with_width(mut self, width: impl Into<Vec<f64>>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Validates the inputs and computes the derived fields.
    ///
    /// # Errors
    ///
    /// - [`LatticeError::EmptySizes`] if `sizes` is empty.
    /// - [`LatticeError::ShapeMismatch`] if an explicit `ndim`, `lower`,
    ///   `upper` or `width` does not match the number of axes.
    /// - [`LatticeError::TooFewDimensions`] if there are fewer than three axes.
    /// - [`LatticeError::NonPositiveSize`] if any cell count is zero.
    /// - [`LatticeError::NonFiniteBound`] if a bound is NaN or infinite.
    /// - [`LatticeError::InvalidBounds`] if `lower[i] >= upper[i]` on any axis.
    /// - [`LatticeError::InvalidWidth`] if an explicit width is not finite and positive.
    /// - [`LatticeError::IndexSpaceOverflow`] if the packed ids would not fit in 64 bits.
    #[allow(clippy::cast_precision_loss)]
    pub fn build(self) -> LatticeResult<LatticeConfig> {
        let Self {
            sizes,
            ndim,
            lower,
            upper,
            width,
        } = self;

        if sizes.is_empty() {
            return Err(LatticeError::EmptySizes);
        }
        let ndim = match ndim {
            Some(n) if n != sizes.len() => {
                return Err(LatticeError::ShapeMismatch {
                    field: "ndim",
                    expected: sizes.len(),
                    actual: n,
                });
            }
            _ => sizes.len(),
        };
        if ndim < MIN_DIMENSIONS {
            return Err(LatticeError::TooFewDimensions { ndim });
        }
        if let Some(axis) = sizes.iter().position(|&s| s == 0) {
            return Err(LatticeError::NonPositiveSize { axis, size: 0 });
        }

        let lower = checked_bound("lower", lower.unwrap_or_else(|| vec![0.0; ndim]), ndim)?;
        let upper = checked_bound("upper", upper.unwrap_or_else(|| vec![1.0; ndim]), ndim)?;
        if let Some(axis) = (0..ndim).find(|&i| lower[i] >= upper[i]) {
            return Err(LatticeError::InvalidBounds {
                axis,
                lower: lower[axis],
                upper: upper[axis],
            });
        }

        let width = match width {
            Some(width) => {
                check_shape("width", width.len(), ndim)?;
                if let Some(axis) = width.iter().position(|w| !(w.is_finite() && *w > 0.0)) {
                    return Err(LatticeError::InvalidWidth {
                        axis,
                        width: width[axis],
                    });
                }
                width
            }
            None => (0..ndim)
                .map(|i| (upper[i] - lower[i]) / sizes[i] as f64)
                .collect(),
        };

        let padded_sizes = sizes
            .iter()
            .map(|s| s.checked_add(2 * PADDING))
            .collect::<Option<Vec<_>>>()
            .ok_or(LatticeError::IndexSpaceOverflow)?;
        let strides = strides_for(&padded_sizes)?;

        let config = LatticeConfig {
            ndim,
            sizes,
            lower,
            upper,
            width,
            padded_sizes,
            strides,
        };
        debug!(
            ndim = config.ndim,
            cardinality = config.cardinality(),
            "Built BCC lattice config"
        );
        Ok(config)
    }
}

fn check_shape(field: &'static str, actual: usize, expected: usize) -> LatticeResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(LatticeError::ShapeMismatch {
            field,
            expected,
            actual,
        })
    }
}

fn checked_bound(field: &'static str, bound: Vec<f64>, ndim: usize) -> LatticeResult<Vec<f64>> {
    check_shape(field, bound.len(), ndim)?;
    if let Some(axis) = bound.iter().position(|v| !v.is_finite()) {
        return Err(LatticeError::NonFiniteBound {
            field,
            axis,
            value: bound[axis],
        });
    }
    Ok(bound)
}

/// Mixed-radix strides, rejecting index spaces whose doubled size overflows.
fn strides_for(padded_sizes: &[u64]) -> LatticeResult<Vec<u64>> {
    let mut strides = Vec::with_capacity(padded_sizes.len());
    let mut stride: u64 = 1;
    for &n in padded_sizes {
        strides.push(stride);
        stride = stride
            .checked_mul(n)
            .ok_or(LatticeError::IndexSpaceOverflow)?;
    }
    // Room for the parity bit.
    if stride.checked_mul(2).is_none() {
        return Err(LatticeError::IndexSpaceOverflow);
    }
    Ok(strides)
}
