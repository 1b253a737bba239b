//! gf-solver: iterative flow and liquid resolution for gridflow layouts.
//!
//! The facade is [`solve`]: hand it placed parts and a catalog, get back
//! one [`FlowPart`] per input part with net flows and liquid mixtures
//! keyed by the part's local points. Solving never fails; degenerate
//! layouts degrade (unknown parts are inert, open ends stay dry) and
//! non-convergence is reported through [`Solution::stable`].
//!
//! # Example
//!
//! ```
//! use gf_catalog::{Catalog, Part};
//! use gf_geometry::{LEFT, RIGHT};
//! use gf_solver::solve;
//!
//! let catalog = Catalog::builtin();
//! let parts = vec![
//!     Part::new("SystemInput", 0, 0),
//!     Part::new("StraightTube", 1, 0),
//!     Part::new("SystemOutput", 2, 0),
//! ];
//!
//! let solution = solve(&parts, &catalog);
//! assert!(solution.stable);
//!
//! let tube = &solution.parts[1];
//! assert!((tube.flow_at(LEFT) - 10.0).abs() < 1e-6);
//! assert!((tube.flow_at(RIGHT) + 10.0).abs() < 1e-6);
//! ```

pub mod config;
pub mod mixing;
pub mod relax;
pub mod snapshot;
pub mod solve;

pub use config::SolverConfig;
pub use relax::EdgeFlows;
pub use snapshot::FlowPart;
pub use solve::{Solution, solve, solve_with};
