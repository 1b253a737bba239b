//! gf-core: stable foundation for gridflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for graph/part objects)

pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use ids::*;
pub use numeric::*;
