//! Part-local to global coordinate transforms.

use crate::point::{CELL_TENTHS, GridPoint};
use serde::{Deserialize, Serialize};

/// Quarter-turn rotation of a placed part.
///
/// The set of legal rotations is closed, so this is an enum rather than a
/// free angle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Normalize an authored angle in degrees. Anything that is not a
    /// multiple of 90 falls back to no rotation.
    pub fn from_degrees(deg: i32) -> Self {
        match deg.rem_euclid(360) {
            90 => Rotation::R90,
            180 => Rotation::R180,
            270 => Rotation::R270,
            _ => Rotation::R0,
        }
    }

    pub fn degrees(self) -> i32 {
        self.quarter_turns() as i32 * 90
    }

    /// Number of clockwise quarter turns (0..=3).
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            1 => Rotation::R90,
            2 => Rotation::R180,
            3 => Rotation::R270,
            _ => Rotation::R0,
        }
    }

    /// Compose two rotations.
    pub fn compose(self, other: Rotation) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        Self::from_quarter_turns(4 - self.quarter_turns())
    }
}

/// Footprint size after rotation: width and height swap on quarter turns.
pub fn rotated_size(rotation: Rotation, size: (u32, u32)) -> (u32, u32) {
    match rotation {
        Rotation::R0 | Rotation::R180 => size,
        Rotation::R90 | Rotation::R270 => (size.1, size.0),
    }
}

/// Placement of a part footprint on the global grid.
///
/// `local_to_global` applies, in order: horizontal flip within the
/// unrotated footprint, clockwise rotation about the footprint, then
/// translation by the grid position. All arithmetic stays in integer
/// tenths, so the composition is exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Grid position of the part's top-left cell.
    pub position: (i32, i32),
    pub rotation: Rotation,
    pub flipped: bool,
    /// Unrotated footprint in cells.
    pub size: (u32, u32),
}

impl Placement {
    pub fn local_to_global(&self, point: GridPoint) -> GridPoint {
        let (mut w, mut h) = (
            self.size.0 as i32 * CELL_TENTHS,
            self.size.1 as i32 * CELL_TENTHS,
        );

        let mut p = if self.flipped {
            GridPoint::from_tenths(w - point.tx, point.ty)
        } else {
            point
        };

        // Clockwise quarter turns; the bounding box swaps each turn.
        for _ in 0..self.rotation.quarter_turns() {
            p = GridPoint::from_tenths(h - p.ty, p.tx);
            core::mem::swap(&mut w, &mut h);
        }

        p.translate(self.position.0, self.position.1)
    }
}
