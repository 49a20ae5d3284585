use core::fmt;
use serde::{Deserialize, Serialize};

/// Single grid axis used for board columns and rows.
pub type Dim = u8;

/// Flat index into the board's cell sequence, also used for cell and pair counts.
pub type Position = u16;

/// Grid coordinates `(column, row)`.
pub type Coord2 = (Dim, Dim);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Grids are stored row-major, so the ndarray index is `[row, column]`.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Dim, b: Dim) -> Position {
    let a = a as Position;
    let b = b as Position;
    a.saturating_mul(b)
}

/// Key shared by exactly two cards of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(pub u16);

impl PairId {
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u16> for PairId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
