//! gf-liquids: liquid identity and mixing for gridflow.
//!
//! Provides:
//! - `Liquid`: a color identity (liquids are told apart by display color)
//! - The standard brewing palette (cold/hot water, wort, beer)
//! - `Mixture`: a normalized, flow-weighted combination of liquids
//!
//! # Example
//!
//! ```
//! use gf_liquids::{COLD_WATER, HOT_WATER, Mixture};
//!
//! let cold = Mixture::pure(COLD_WATER);
//! let hot = Mixture::pure(HOT_WATER);
//! let mixed = Mixture::blend([(6.0, &cold), (4.0, &hot)]).unwrap();
//! assert!((mixed.fraction(COLD_WATER) - 0.6).abs() < 1e-12);
//! ```

pub mod error;
pub mod liquid;
pub mod mixture;

pub use error::{LiquidError, LiquidResult};
pub use liquid::{BEER, COLD_WATER, HOT_WATER, Liquid, WORT};
pub use mixture::Mixture;
