//! Built-in part types.
//!
//! Each submodule exposes `PartSpec` constructors for one family of
//! parts. The registry in [`crate::Catalog::builtin`] collects them all.

pub mod io;
pub mod pump;
pub mod tube;
pub mod valve;
pub mod vessel;

use crate::part::Part;
use crate::registry::PartSpec;

/// All built-in specifications, in registration order.
pub fn all() -> Vec<PartSpec> {
    vec![
        tube::straight(),
        tube::elbow(),
        tube::tee(),
        tube::cross(),
        tube::dip(),
        pump::pump(),
        valve::valve(),
        valve::check_valve(),
        valve::actuator_valve(),
        io::input(),
        io::output(),
        vessel::kettle(),
    ]
}

/// Footprint of every single-cell part.
pub(crate) fn unit_size(_: &Part) -> (u32, u32) {
    (1, 1)
}
