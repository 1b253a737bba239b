//! Grid points at exact tenth-of-a-cell resolution.

use core::fmt;
use serde::{Deserialize, Serialize};

/// One grid cell measured in tenths.
pub const CELL_TENTHS: i32 = 10;

/// A coordinate in the shared grid plane.
///
/// Stored as integer tenths of a cell so the sub-cell connection offsets
/// used by part specifications (0.1, 0.5) survive flipping and quarter
/// rotations without rounding. Equality and ordering are therefore exact,
/// which is what lets assembly merge coincident endpoints by key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    /// Horizontal offset in tenths of a cell.
    pub tx: i32,
    /// Vertical offset in tenths of a cell.
    pub ty: i32,
}

/// Middle of the top edge of a unit cell.
pub const UP: GridPoint = GridPoint::from_tenths(5, 0);
/// Middle of the right edge of a unit cell.
pub const RIGHT: GridPoint = GridPoint::from_tenths(10, 5);
/// Middle of the bottom edge of a unit cell.
pub const DOWN: GridPoint = GridPoint::from_tenths(5, 10);
/// Middle of the left edge of a unit cell.
pub const LEFT: GridPoint = GridPoint::from_tenths(0, 5);
/// Center of a unit cell (where container parts expose their contents).
pub const CENTER: GridPoint = GridPoint::from_tenths(5, 5);

impl GridPoint {
    /// Construct from raw tenths.
    pub const fn from_tenths(tx: i32, ty: i32) -> Self {
        Self { tx, ty }
    }

    /// Construct from cell coordinates, rounding to the nearest tenth.
    pub fn from_cells(x: f64, y: f64) -> Self {
        Self {
            tx: (x * CELL_TENTHS as f64).round() as i32,
            ty: (y * CELL_TENTHS as f64).round() as i32,
        }
    }

    /// Horizontal position in cells.
    pub fn x(self) -> f64 {
        self.tx as f64 / CELL_TENTHS as f64
    }

    /// Vertical position in cells.
    pub fn y(self) -> f64 {
        self.ty as f64 / CELL_TENTHS as f64
    }

    /// Shift by whole grid cells.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            tx: self.tx + dx * CELL_TENTHS,
            ty: self.ty + dy * CELL_TENTHS,
        }
    }

    /// Whether the point lies on a cell border, where parts connect to
    /// their neighbors. Interior points (stubs, reservoirs, centers) are
    /// private to one part.
    pub fn on_cell_border(self) -> bool {
        self.tx % CELL_TENTHS == 0 || self.ty % CELL_TENTHS == 0
    }

    /// Canonical `"x,y"` key with minimal decimals, e.g. `"1,0.5"`.
    pub fn key(self) -> String {
        self.to_string()
    }
}

fn fmt_tenths(f: &mut fmt::Formatter<'_>, t: i32) -> fmt::Result {
    if t % CELL_TENTHS == 0 {
        write!(f, "{}", t / CELL_TENTHS)
    } else {
        write!(f, "{:.1}", t as f64 / CELL_TENTHS as f64)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tenths(f, self.tx)?;
        write!(f, ",")?;
        fmt_tenths(f, self.ty)
    }
}

impl fmt::Debug for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GridPoint({self})")
    }
}
