//! gf-catalog: the part catalog for gridflow.
//!
//! Provides:
//! - `Part`: the persistent, user-authored description of a placed part
//! - `FlowRoute` / `Transitions`: a part's local flow behavior
//! - `PartSpec`: the static behavior record for one part type
//! - `Catalog`: the closed registry of built-in part types
//!
//! The set of part types is fixed at build time, so dispatch is a lookup
//! into a registry of behavior records rather than trait objects.
//!
//! # Example
//!
//! ```
//! use gf_catalog::{Catalog, Part};
//!
//! let catalog = Catalog::builtin();
//! let pump = Part::new("Pump", 2, 0);
//! assert_eq!(catalog.size_of(&pump), (1, 1));
//! assert_eq!(catalog.transitions_for(&pump).len(), 2);
//! ```

pub mod builtin;
pub mod error;
pub mod part;
pub mod registry;
pub mod route;

pub use error::{CatalogError, CatalogResult};
pub use part::Part;
pub use registry::{Catalog, PartSpec};
pub use route::{DEFAULT_FRICTION, DEFAULT_IO_PRESSURE, DEFAULT_PUMP_PRESSURE, FlowRoute, Transitions};
