//! Point-to-cell and cell-to-center mapping on a BCC lattice.
//!
//! A point is first located in the box grid: `raw = (p - lower) / width`,
//! split into `floor(raw)` and the signed offset `frac = raw - floor - 1/2`
//! from the cell center. If the summed offset magnitude exceeds `ndim / 4`
//! the point is closer to a corner of the cell than to its center, and it is
//! assigned to the corner sub-lattice. On each axis the corner index steps
//! down by one where the point sits below the center.

// Lattice indices are far below 2^52; float <-> int casts are exact in practice.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use std::sync::Arc;

use nalgebra::Point3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::cell::{CellId, LatticeCell, Parity};
use crate::config::{LatticeConfig, PADDING};
use crate::error::{LatticeError, LatticeResult};

/// Batches at least this large are mapped on the rayon pool when parallel
/// processing is enabled.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// How [`LatticeIndexer::bin_index`] treats points outside the padded index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundsMode {
    /// Every finite point gets an id. Points within one cell of the box land
    /// in the padding; points further out get a well-defined id that does
    /// not describe their location.
    #[default]
    Padded,
    /// Points whose cell falls outside the padded index space fail with
    /// [`LatticeError::OutsideDomain`]; non-finite coordinates fail with
    /// [`LatticeError::NonFiniteCoordinate`].
    Strict,
}

/// Maps points to BCC cell ids and cell ids back to cell centers.
///
/// The indexer holds a shared, read-only [`LatticeConfig`]. Every operation
/// is a pure function of its input and the config, so an indexer can be
/// shared across threads freely.
///
/// # Example
///
/// ```
/// use bcc_lattice::{LatticeConfig, LatticeIndexer, Parity};
/// use approx::assert_relative_eq;
///
/// let config = LatticeConfig::builder(vec![4, 4, 4])
///     .with_bounds(vec![0.0; 3], vec![4.0; 3])
///     .build()
///     .unwrap();
/// let indexer = LatticeIndexer::new(config);
///
/// let id = indexer.bin_index(&[2.5, 2.5, 2.5]).unwrap();
/// assert_eq!(Parity::of(id), Parity::BodyCenter);
///
/// let center = indexer.bin_center(id);
/// assert_relative_eq!(center[0], 2.5, epsilon = 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LatticeIndexer {
    config: Arc<LatticeConfig>,
    bounds_mode: BoundsMode,
    parallel: bool,
}

impl LatticeIndexer {
    /// Creates an indexer in [`BoundsMode::Padded`] with parallel batches.
    #[must_use]
    pub fn new(config: LatticeConfig) -> Self {
        Self::from_shared(Arc::new(config))
    }

    /// Creates an indexer over a config shared with other indexers.
    #[must_use]
    pub fn from_shared(config: Arc<LatticeConfig>) -> Self {
        Self {
            config,
            bounds_mode: BoundsMode::default(),
            parallel: true,
        }
    }

    /// Sets how out-of-box points are handled.
    #[must_use]
    pub const fn with_bounds_mode(mut self, mode: BoundsMode) -> Self {
        self.bounds_mode = mode;
        self
    }

    /// Enable or disable parallel batch processing.
    ///
    /// Results are identical either way; only the scheduling differs.
    /// Has no effect without the `parallel` feature.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The lattice configuration.
    #[must_use]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// The bounds handling mode.
    #[must_use]
    pub const fn bounds_mode(&self) -> BoundsMode {
        self.bounds_mode
    }

    /// Number of distinct mixed-radix indices: the product of the padded
    /// axis sizes.
    ///
    /// Each index exists with both parities, so the number of distinct cell
    /// ids is twice this value.
    ///
    /// ```
    /// use bcc_lattice::{LatticeConfig, LatticeIndexer};
    ///
    /// let indexer = LatticeIndexer::new(LatticeConfig::new(vec![4, 4, 4]).unwrap());
    /// assert_eq!(indexer.cardinality(), 216);
    /// ```
    #[must_use]
    pub fn cardinality(&self) -> u64 {
        self.config.cardinality()
    }

    /// Returns `true` if the id's index part lies inside the padded index
    /// space, i.e. it round-trips through [`unpack`](Self::unpack) and
    /// [`pack`](Self::pack).
    #[must_use]
    pub fn is_addressable(&self, id: CellId) -> bool {
        (id >> 1) < self.cardinality()
    }

    /// Maps a point to the id of its enclosing BCC cell.
    ///
    /// # Errors
    ///
    /// - [`LatticeError::DimensionMismatch`] if `point.len() != ndim`.
    /// - [`LatticeError::OutsideDomain`] in [`BoundsMode::Strict`] when the
    ///   point's cell is outside the padded index space.
    /// - [`LatticeError::NonFiniteCoordinate`] in [`BoundsMode::Strict`] for
    ///   NaN or infinite coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use bcc_lattice::{LatticeConfig, LatticeIndexer, Parity};
    ///
    /// let indexer = LatticeIndexer::new(LatticeConfig::new(vec![4, 4, 4]).unwrap());
    ///
    /// // The box corner is a corner-lattice site.
    /// let id = indexer.bin_index(&[0.0, 0.0, 0.0]).unwrap();
    /// assert_eq!(id, 1);
    /// assert_eq!(Parity::of(id), Parity::Corner);
    /// ```
    pub fn bin_index(&self, point: &[f64]) -> LatticeResult<CellId> {
        let ndim = self.config.ndim();
        if point.len() != ndim {
            return Err(LatticeError::DimensionMismatch {
                expected: ndim,
                actual: point.len(),
            });
        }

        let offset_sum: f64 = point
            .iter()
            .enumerate()
            .map(|(axis, &value)| self.locate(axis, value).1.abs())
            .sum();
        // Ties at exactly ndim / 4 stay on the body-center lattice.
        let parity = Parity::from(0.25 * (ndim as f64) < offset_sum);

        let strides = self.config.strides();
        let padded_sizes = self.config.padded_sizes();
        let strict = self.bounds_mode == BoundsMode::Strict;
        let mut flat: i64 = 0;
        for (axis, &value) in point.iter().enumerate() {
            let (floor, frac) = self.locate(axis, value);
            let index = if parity.is_corner() && frac < 0.0 {
                floor.wrapping_sub(1)
            } else {
                floor
            };
            let shifted = index.wrapping_add(PADDING as i64);
            if strict {
                if !value.is_finite() {
                    return Err(LatticeError::NonFiniteCoordinate { axis, value });
                }
                if !(0..padded_sizes[axis] as i64).contains(&shifted) {
                    return Err(LatticeError::OutsideDomain {
                        axis,
                        value,
                        index: shifted,
                        padded_size: padded_sizes[axis],
                    });
                }
            }
            flat = flat.wrapping_add((strides[axis] as i64).wrapping_mul(shifted));
        }

        Ok(((flat as u64) << 1) | parity.bit())
    }

    /// Maps a 3D point to its cell id.
    ///
    /// # Errors
    ///
    /// Same as [`bin_index`](Self::bin_index); fails with
    /// [`LatticeError::DimensionMismatch`] unless the lattice is 3D.
    pub fn bin_index_point(&self, point: &Point3<f64>) -> LatticeResult<CellId> {
        self.bin_index(point.coords.as_slice())
    }

    /// Maps a batch of points to cell ids.
    ///
    /// Each output corresponds to the input at the same position, and equals
    /// what [`bin_index`](Self::bin_index) returns for that point.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing point, wrapped in
    /// [`LatticeError::AtPoint`] with its position.
    pub fn bin_indices<P>(&self, points: &[P]) -> LatticeResult<Vec<CellId>>
    where
        P: AsRef<[f64]> + Sync,
    {
        self.try_bin_indices(points).into_iter().collect()
    }

    /// Maps a batch of points to per-point results.
    ///
    /// A failing point does not affect the others. Errors are wrapped in
    /// [`LatticeError::AtPoint`] with the point's position.
    ///
    /// ```
    /// use bcc_lattice::{BoundsMode, LatticeConfig, LatticeIndexer};
    ///
    /// let indexer = LatticeIndexer::new(LatticeConfig::new(vec![4, 4, 4]).unwrap())
    ///     .with_bounds_mode(BoundsMode::Strict);
    ///
    /// let results = indexer.try_bin_indices(&[[0.5, 0.5, 0.5], [9.0, 0.5, 0.5]]);
    /// assert!(results[0].is_ok());
    /// assert_eq!(results[1].as_ref().unwrap_err().point_index(), Some(1));
    /// ```
    pub fn try_bin_indices<P>(&self, points: &[P]) -> Vec<LatticeResult<CellId>>
    where
        P: AsRef<[f64]> + Sync,
    {
        debug!(
            points = points.len(),
            parallel = self.runs_parallel(points.len()),
            "Binning point batch"
        );
        let results = self.map_batch(points, |index, point| {
            self.bin_index(point.as_ref())
                .map_err(|err| LatticeError::at_point(index, err))
        });

        if self.bounds_mode == BoundsMode::Strict {
            let rejected = results.iter().filter(|r| r.is_err()).count();
            if rejected > 0 {
                warn!(rejected, points = points.len(), "Points rejected in strict mode");
            }
        }
        results
    }

    /// Maps a row-major `(n, ndim)` coordinate buffer to cell ids.
    ///
    /// # Errors
    ///
    /// [`LatticeError::DimensionMismatch`] if the buffer length is not a
    /// multiple of `ndim`; otherwise as [`bin_indices`](Self::bin_indices).
    pub fn bin_indices_flat(&self, coords: &[f64]) -> LatticeResult<Vec<CellId>> {
        let ndim = self.config.ndim();
        if coords.len() % ndim != 0 {
            return Err(LatticeError::DimensionMismatch {
                expected: coords.len().next_multiple_of(ndim),
                actual: coords.len(),
            });
        }
        let rows: Vec<&[f64]> = coords.chunks_exact(ndim).collect();
        self.bin_indices(&rows)
    }

    /// Returns the center of the cell named by `id`.
    ///
    /// Any id is accepted. Ids beyond the padded index space wrap on each
    /// axis, as in [`unpack`](Self::unpack).
    #[must_use]
    pub fn bin_center(&self, id: CellId) -> Vec<f64> {
        let mut center = vec![0.0; self.config.ndim()];
        self.write_center(id, &mut center);
        center
    }

    /// Writes the center of the cell named by `id` into `out`.
    ///
    /// # Errors
    ///
    /// [`LatticeError::DimensionMismatch`] if `out.len() != ndim`.
    pub fn bin_center_into(&self, id: CellId, out: &mut [f64]) -> LatticeResult<()> {
        let ndim = self.config.ndim();
        if out.len() != ndim {
            return Err(LatticeError::DimensionMismatch {
                expected: ndim,
                actual: out.len(),
            });
        }
        self.write_center(id, out);
        Ok(())
    }

    /// Returns the centers of a batch of cell ids, in input order.
    #[must_use]
    pub fn bin_centers(&self, ids: &[CellId]) -> Vec<Vec<f64>> {
        self.map_batch(ids, |_, &id| self.bin_center(id))
    }

    /// Returns the center of a cell on a 3D lattice.
    ///
    /// # Errors
    ///
    /// [`LatticeError::DimensionMismatch`] unless the lattice is 3D.
    pub fn bin_center_point(&self, id: CellId) -> LatticeResult<Point3<f64>> {
        if self.config.ndim() != 3 {
            return Err(LatticeError::DimensionMismatch {
                expected: self.config.ndim(),
                actual: 3,
            });
        }
        let mut center = [0.0; 3];
        self.write_center(id, &mut center);
        Ok(Point3::from(center))
    }

    /// Packs a cell into its id.
    ///
    /// Indices outside `-1..=sizes[i]` are packed with wrapping arithmetic,
    /// like far-away points in [`BoundsMode::Padded`].
    ///
    /// # Errors
    ///
    /// [`LatticeError::DimensionMismatch`] if the cell has the wrong number of axes.
    ///
    /// ```
    /// use bcc_lattice::{LatticeCell, LatticeConfig, LatticeIndexer, Parity};
    ///
    /// let indexer = LatticeIndexer::new(LatticeConfig::new(vec![4, 4, 4]).unwrap());
    /// let cell = LatticeCell::new(vec![1, 1, 1], Parity::Corner);
    /// let id = indexer.pack(&cell).unwrap();
    /// assert_eq!(id, 173);
    /// assert_eq!(indexer.unpack(id), cell);
    /// ```
    pub fn pack(&self, cell: &LatticeCell) -> LatticeResult<CellId> {
        let ndim = self.config.ndim();
        if cell.ndim() != ndim {
            return Err(LatticeError::DimensionMismatch {
                expected: ndim,
                actual: cell.ndim(),
            });
        }
        let flat = cell
            .indices
            .iter()
            .zip(self.config.strides())
            .fold(0i64, |acc, (&index, &stride)| {
                acc.wrapping_add(
                    (stride as i64).wrapping_mul(index.wrapping_add(PADDING as i64)),
                )
            });
        Ok(((flat as u64) << 1) | cell.parity.bit())
    }

    /// Splits an id into its parity and unshifted index vector.
    #[must_use]
    pub fn unpack(&self, id: CellId) -> LatticeCell {
        let flat = id >> 1;
        let indices = self
            .config
            .strides()
            .iter()
            .zip(self.config.padded_sizes())
            .map(|(&stride, &size)| ((flat / stride) % size) as i64 - PADDING as i64)
            .collect::<Vec<_>>();
        LatticeCell::new(indices, Parity::of(id))
    }

    /// Returns the center of a cell given by index vector and parity.
    ///
    /// # Errors
    ///
    /// [`LatticeError::DimensionMismatch`] if the cell has the wrong number of axes.
    pub fn cell_center(&self, cell: &LatticeCell) -> LatticeResult<Vec<f64>> {
        let ndim = self.config.ndim();
        if cell.ndim() != ndim {
            return Err(LatticeError::DimensionMismatch {
                expected: ndim,
                actual: cell.ndim(),
            });
        }
        Ok(cell
            .indices
            .iter()
            .enumerate()
            .map(|(axis, &index)| self.axis_center(axis, index, cell.parity))
            .collect())
    }

    /// Grid position of `value` on one axis: `(floor(raw), raw - floor - 1/2)`.
    #[inline]
    fn locate(&self, axis: usize, value: f64) -> (i64, f64) {
        let raw = (value - self.config.lower()[axis]) / self.config.width()[axis];
        let floor = raw.floor();
        (floor as i64, raw - floor - 0.5)
    }

    #[inline]
    fn axis_center(&self, axis: usize, index: i64, parity: Parity) -> f64 {
        let width = self.config.width()[axis];
        let half = 0.5 * width;
        let corner_shift = if parity.is_corner() { half } else { 0.0 };
        (index as f64).mul_add(width, self.config.lower()[axis]) + half + corner_shift
    }

    fn write_center(&self, id: CellId, out: &mut [f64]) {
        let parity = Parity::of(id);
        let flat = id >> 1;
        let strides = self.config.strides();
        let padded_sizes = self.config.padded_sizes();
        for (axis, slot) in out.iter_mut().enumerate() {
            let index = ((flat / strides[axis]) % padded_sizes[axis]) as i64 - PADDING as i64;
            *slot = self.axis_center(axis, index, parity);
        }
    }

    fn runs_parallel(&self, len: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && len >= PARALLEL_THRESHOLD
    }

    fn map_batch<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(usize, &T) -> U + Sync,
    {
        #[cfg(feature = "parallel")]
        if self.runs_parallel(items.len()) {
            return items
                .par_iter()
                .enumerate()
                .map(|(index, item)| f(index, item))
                .collect();
        }
        items
            .iter()
            .enumerate()
            .map(|(index, item)| f(index, item))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 4x4x4 cells of unit width over `[0, 4]^3`.
    fn unit_width_indexer() -> LatticeIndexer {
        let config = LatticeConfig::builder(vec![4, 4, 4])
            .with_bounds(vec![0.0; 3], vec![4.0; 3])
            .build()
            .unwrap();
        LatticeIndexer::new(config)
    }

    fn assert_center(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_relative_eq!(*a, *e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_golden_box_center() {
        let indexer = unit_width_indexer();
        // raw = 2, floor = 2, frac = -0.5 on every axis: corner, stepped to 1.
        let id = indexer.bin_index(&[2.0, 2.0, 2.0]).unwrap();
        assert_eq!(id, 173);
        assert_eq!(
            indexer.unpack(id),
            LatticeCell::new(vec![1, 1, 1], Parity::Corner)
        );
        assert_center(&indexer.bin_center(id), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_point_at_lower_is_first_corner() {
        let indexer = unit_width_indexer();
        let id = indexer.bin_index(&[0.0, 0.0, 0.0]).unwrap();
        // Shifted index vector all zeros, corner parity.
        assert_eq!(id, 1);
        assert_center(&indexer.bin_center(id), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_body_center_cell() {
        let indexer = unit_width_indexer();
        let id = indexer.bin_index(&[2.5, 2.5, 2.5]).unwrap();
        assert_eq!(id, 258);
        assert_eq!(Parity::of(id), Parity::BodyCenter);
        assert_center(&indexer.bin_center(id), &[2.5, 2.5, 2.5]);
    }

    #[test]
    fn test_threshold_tie_stays_body_center() {
        let indexer = unit_width_indexer();
        // |frac| = 0.25 on every axis sums to exactly 0.75 = ndim / 4.
        let tie = indexer.bin_index(&[0.75, 0.75, 0.75]).unwrap();
        assert_eq!(tie, 86);
        assert_eq!(Parity::of(tie), Parity::BodyCenter);

        let past = indexer.bin_index(&[0.75, 0.75, 0.8]).unwrap();
        assert_eq!(past, 87);
        assert_center(&indexer.bin_center(past), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_corner_steps_down_below_center() {
        let indexer = unit_width_indexer();
        let id = indexer.bin_index(&[0.9, 0.1, 0.9]).unwrap();
        assert_eq!(
            indexer.unpack(id),
            LatticeCell::new(vec![0, -1, 0], Parity::Corner)
        );
        assert_center(&indexer.bin_center(id), &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_negative_coordinates_use_floor() {
        let indexer = unit_width_indexer();
        let id = indexer.bin_index(&[-0.6, 0.5, 0.5]).unwrap();
        assert_eq!(id, 84);
        assert_center(&indexer.bin_center(id), &[-0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let indexer = unit_width_indexer();
        let err = indexer.bin_index(&[0.5, 0.5]).unwrap_err();
        assert_eq!(
            err,
            LatticeError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_padded_mode_accepts_far_points() {
        let indexer = unit_width_indexer();
        assert!(indexer.bin_index(&[-100.0, 0.5, 0.5]).is_ok());
        assert!(indexer.bin_index(&[f64::NAN, 0.5, 0.5]).is_ok());
    }

    #[test]
    fn test_strict_mode_rejects_outside_padding() {
        let indexer = unit_width_indexer().with_bounds_mode(BoundsMode::Strict);

        let err = indexer.bin_index(&[-1.5, 0.5, 0.5]).unwrap_err();
        assert_eq!(
            err,
            LatticeError::OutsideDomain {
                axis: 0,
                value: -1.5,
                index: -1,
                padded_size: 6,
            }
        );
        assert!(matches!(
            indexer.bin_index(&[0.5, 0.5, 5.0]),
            Err(LatticeError::OutsideDomain {
                axis: 2,
                index: 6,
                ..
            })
        ));
        assert!(matches!(
            indexer.bin_index(&[0.5, f64::NAN, 0.5]),
            Err(LatticeError::NonFiniteCoordinate { axis: 1, .. })
        ));

        // Inside the padding is fine.
        let id = indexer.bin_index(&[4.9, 0.5, 0.5]).unwrap();
        assert!(indexer.is_addressable(id));
        assert!(indexer.bin_index(&[-0.6, 0.5, 0.5]).is_ok());
    }

    #[test]
    fn test_strict_batch_isolates_failures() {
        let indexer = unit_width_indexer().with_bounds_mode(BoundsMode::Strict);
        let points = [[0.5, 0.5, 0.5], [-3.0, 0.5, 0.5], [2.5, 2.5, 2.5]];

        let results = indexer.try_bin_indices(&points);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Ok(indexer.bin_index(&points[0]).unwrap()));
        assert_eq!(results[2], Ok(258));
        let err = results[1].clone().unwrap_err();
        assert_eq!(err.point_index(), Some(1));
        assert!(err.is_domain_error());

        let err = indexer.bin_indices(&points).unwrap_err();
        assert_eq!(err.point_index(), Some(1));
    }

    #[test]
    fn test_batch_matches_scalar() {
        let indexer = unit_width_indexer();
        let points: Vec<Vec<f64>> = (0..50_i32)
            .map(|i| {
                let t = f64::from(i) * 0.093;
                vec![t, 4.0 - t, (t * 1.7) % 4.0]
            })
            .collect();
        let batch = indexer.bin_indices(&points).unwrap();
        for (point, id) in points.iter().zip(&batch) {
            assert_eq!(indexer.bin_index(point).unwrap(), *id);
        }
    }

    #[test]
    fn test_parallel_batch_matches_sequential() {
        let indexer = unit_width_indexer();
        let points: Vec<[f64; 3]> = (0..PARALLEL_THRESHOLD as u32 + 10)
            .map(|i| {
                let t = f64::from(i) * 0.001;
                [t % 4.0, (t * 3.0) % 4.0, (t * 7.0) % 4.0]
            })
            .collect();
        let parallel = indexer.bin_indices(&points).unwrap();
        let sequential = indexer
            .clone()
            .with_parallel(false)
            .bin_indices(&points)
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_flat_batch() {
        let indexer = unit_width_indexer();
        let ids = indexer
            .bin_indices_flat(&[2.0, 2.0, 2.0, 2.5, 2.5, 2.5])
            .unwrap();
        assert_eq!(ids, vec![173, 258]);

        let err = indexer.bin_indices_flat(&[0.5; 4]).unwrap_err();
        assert_eq!(
            err,
            LatticeError::DimensionMismatch {
                expected: 6,
                actual: 4
            }
        );
    }

    #[test]
    fn test_bin_center_into_and_batch() {
        let indexer = unit_width_indexer();
        let mut out = [0.0; 3];
        indexer.bin_center_into(258, &mut out).unwrap();
        assert_center(&out, &[2.5, 2.5, 2.5]);
        assert!(indexer.bin_center_into(258, &mut [0.0; 4]).is_err());

        let centers = indexer.bin_centers(&[1, 173, 258]);
        assert_center(&centers[0], &[0.0, 0.0, 0.0]);
        assert_center(&centers[1], &[2.0, 2.0, 2.0]);
        assert_center(&centers[2], &[2.5, 2.5, 2.5]);
    }

    #[test]
    fn test_point3_helpers() {
        let indexer = unit_width_indexer();
        let id = indexer.bin_index_point(&Point3::new(2.5, 2.5, 2.5)).unwrap();
        assert_eq!(id, 258);
        let center = indexer.bin_center_point(id).unwrap();
        assert_center(center.coords.as_slice(), &[2.5, 2.5, 2.5]);

        let four_d = LatticeIndexer::new(LatticeConfig::new(vec![2, 2, 2, 2]).unwrap());
        assert!(four_d.bin_index_point(&Point3::origin()).is_err());
        assert_eq!(
            four_d.bin_center_point(0).unwrap_err(),
            LatticeError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_cell_center_matches_bin_center() {
        let indexer = unit_width_indexer();
        let cell = LatticeCell::new(vec![3, -1, 4], Parity::BodyCenter);
        let id = indexer.pack(&cell).unwrap();
        assert_eq!(indexer.cell_center(&cell).unwrap(), indexer.bin_center(id));
        assert_center(&indexer.bin_center(id), &[3.5, -0.5, 4.5]);
        assert!(
            indexer
                .cell_center(&LatticeCell::new(vec![0, 0], Parity::Corner))
                .is_err()
        );
    }

    #[test]
    fn test_cardinality_and_addressable() {
        let indexer = unit_width_indexer();
        assert_eq!(indexer.cardinality(), 216);
        assert!(indexer.is_addressable(2 * 216 - 1));
        assert!(!indexer.is_addressable(2 * 216));
    }

    #[test]
    fn test_shared_config() {
        let config = Arc::new(LatticeConfig::new(vec![3, 3, 3]).unwrap());
        let a = LatticeIndexer::from_shared(Arc::clone(&config));
        let b = LatticeIndexer::from_shared(config).with_bounds_mode(BoundsMode::Strict);
        assert_eq!(a.config(), b.config());
        assert_eq!(a.bounds_mode(), BoundsMode::Padded);
        assert_eq!(b.bounds_mode(), BoundsMode::Strict);
    }
}
