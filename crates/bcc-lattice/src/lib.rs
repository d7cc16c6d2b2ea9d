//! Body-centered-cubic (BCC) lattice binning.
//!
//! A BCC lattice tiles N-dimensional space with two interleaved simple-cubic
//! lattices: the body-center lattice, whose sites sit at the centers of a
//! regular box grid, and the corner lattice, offset from it by half a cell on
//! every axis. Its neighbor distances are more isotropic than those of a
//! plain cubic grid, which makes it a common choice for spatial binning.
//!
//! This crate provides:
//!
//! - [`LatticeConfig`] - Validated lattice description (axis counts, box, cell width)
//! - [`LatticeIndexer`] - Point to cell id, cell id to center, batch variants
//! - [`CellId`], [`Parity`], [`LatticeCell`] - Packed and unpacked cell identifiers
//! - [`LatticeError`] - Configuration and domain errors
//!
//! # Cell Ids
//!
//! A [`CellId`] packs the per-axis lattice index, shifted by one padding
//! cell, into a mixed-radix integer over the padded axis sizes (`sizes + 2`),
//! then shifts it left by one bit to hold the [`Parity`]. The padding holds the
//! boundary cells whose index falls one step outside `0..sizes`, such as the
//! corner sites on the lower faces of the box.
//!
//! # Example
//!
//! ```
//! use bcc_lattice::{LatticeConfig, LatticeIndexer, Parity};
//! use approx::assert_relative_eq;
//!
//! let config = LatticeConfig::builder(vec![4, 4, 4])
//!     .with_bounds(vec![0.0; 3], vec![4.0; 3])
//!     .build()
//!     .unwrap();
//! let indexer = LatticeIndexer::new(config);
//!
//! // A grid vertex belongs to the corner lattice.
//! let id = indexer.bin_index(&[2.0, 2.0, 2.0]).unwrap();
//! assert_eq!(Parity::of(id), Parity::Corner);
//!
//! let center = indexer.bin_center(id);
//! for c in center {
//!     assert_relative_eq!(c, 2.0, epsilon = 1e-9);
//! }
//!
//! // Batches give the same ids as single points, in input order.
//! let ids = indexer.bin_indices(&[[2.0, 2.0, 2.0], [2.5, 2.5, 2.5]]).unwrap();
//! assert_eq!(ids[0], id);
//! ```
//!
//! # Bounds Handling
//!
//! By default every point gets an id; see [`BoundsMode`] for the strict
//! variant that rejects points whose cell falls outside the padded index
//! space.
//!
//! # Features
//!
//! - `parallel` (default): map large batches on the rayon thread pool.
//! - `serde`: serialization for configs and cells. Configs deserialize
//!   through [`LatticeConfigBuilder`], so they are always re-validated.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod cell;
mod config;
mod error;
mod indexer;

pub use cell::{CellId, LatticeCell, Parity};
pub use config::{LatticeConfig, LatticeConfigBuilder, MIN_DIMENSIONS, PADDING};
pub use error::{LatticeError, LatticeResult};
pub use indexer::{BoundsMode, LatticeIndexer, PARALLEL_THRESHOLD};

// Re-export nalgebra types for convenience
pub use nalgebra::Point3;
