//! Cell identifiers and the two interleaved sub-lattices.

/// A packed cell identifier.
///
/// The least-significant bit is the [`Parity`]; the remaining bits hold the
/// mixed-radix flattened index over the padded axis sizes.
pub type CellId = u64;

/// Which of the two interleaved simple-cubic sub-lattices a cell belongs to.
///
/// Body-center cells are centered at `lower + width * (i + 1/2)`; corner
/// cells are offset from those by half a cell on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    /// Cell centered inside a cubic cell of the box grid.
    #[default]
    BodyCenter,
    /// Cell centered on a corner of the box grid.
    Corner,
}

impl Parity {
    /// The parity bit stored in a [`CellId`].
    ///
    /// ```
    /// use bcc_lattice::Parity;
    ///
    /// assert_eq!(Parity::BodyCenter.bit(), 0);
    /// assert_eq!(Parity::Corner.bit(), 1);
    /// ```
    #[must_use]
    pub const fn bit(self) -> u64 {
        match self {
            Self::BodyCenter => 0,
            Self::Corner => 1,
        }
    }

    /// Reads the parity from the low bit of a cell id.
    #[must_use]
    pub const fn of(id: CellId) -> Self {
        if id & 1 == 1 {
            Self::Corner
        } else {
            Self::BodyCenter
        }
    }

    /// Returns `true` for [`Parity::Corner`].
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self, Self::Corner)
    }
}

impl From<bool> for Parity {
    fn from(is_corner: bool) -> Self {
        if is_corner {
            Self::Corner
        } else {
            Self::BodyCenter
        }
    }
}

/// A lattice cell as an index vector plus parity.
///
/// `indices` are unshifted lattice indices: index `0` is the first cell
/// inside the nominal box and `-1` is the padding cell below it. Packing
/// into a [`CellId`] adds the padding offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeCell {
    /// Per-axis lattice index.
    pub indices: Vec<i64>,
    /// Which sub-lattice the cell belongs to.
    pub parity: Parity,
}

impl LatticeCell {
    /// Creates a cell from its index vector and parity.
    #[must_use]
    pub fn new(indices: impl Into<Vec<i64>>, parity: Parity) -> Self {
        Self {
            indices: indices.into(),
            parity,
        }
    }

    /// Number of axes.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.indices.len()
    }
}
