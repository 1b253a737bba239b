//! gf-geometry: grid coordinates and part placement transforms.
//!
//! Provides:
//! - `GridPoint`: exact sub-cell coordinates in integer tenths
//! - Unit-cell anchors (UP/RIGHT/DOWN/LEFT) shared by part specifications
//! - `Rotation`: closed 0/90/180/270 quarter-turn enum
//! - `Placement`: flip + rotate + translate from part-local to global space
//!
//! Key property: transforms are exact. Two adjacent parts whose
//! specifications declare matching boundary anchors produce identical
//! global points, so graph assembly can merge routes by plain key
//! equality instead of geometric proximity search.
//!
//! # Example
//!
//! ```
//! use gf_geometry::{Placement, Rotation, LEFT, UP};
//!
//! let placement = Placement {
//!     position: (3, 2),
//!     rotation: Rotation::R90,
//!     flipped: false,
//!     size: (1, 1),
//! };
//! // LEFT rotates onto UP, then translates by the grid position.
//! assert_eq!(placement.local_to_global(LEFT), UP.translate(3, 2));
//! ```

pub mod point;
pub mod transform;

pub use point::{CELL_TENTHS, CENTER, DOWN, GridPoint, LEFT, RIGHT, UP};
pub use transform::{Placement, Rotation, rotated_size};
