//! System boundary parts: pressurized inlet and drain.

use crate::builtin::unit_size;
use crate::error::CatalogError;
use crate::part::Part;
use crate::registry::PartSpec;
use crate::route::{DEFAULT_IO_PRESSURE, FlowRoute, Transitions};
use gf_geometry::{GridPoint, LEFT, RIGHT};
use gf_liquids::COLD_WATER;
use tracing::warn;

/// Internal stub the inlet supplies from / the drain absorbs into. Offset
/// a tenth into the cell so it can never coincide with a neighbor's point.
const INPUT_STUB: GridPoint = GridPoint::from_tenths(1, 5);
const OUTPUT_STUB: GridPoint = GridPoint::from_tenths(9, 5);

fn input_rate(part: &Part) -> f64 {
    if part.disabled {
        // Disabled inlet stops injecting but still supplies on demand.
        return 0.0;
    }
    match part.setting_f64("pressure") {
        Some(p) if p.is_finite() && p >= 0.0 => p,
        Some(_) => {
            let err = CatalogError::InvalidSettings {
                type_id: part.type_id.clone(),
                what: "pressure must be finite and non-negative",
            };
            warn!(%err, "using default inlet rate");
            DEFAULT_IO_PRESSURE
        }
        None => DEFAULT_IO_PRESSURE,
    }
}

fn input_transitions(part: &Part) -> Transitions {
    let liquid = part.supply_liquid().unwrap_or(COLD_WATER);
    let mut t = Transitions::new();
    t.insert(
        INPUT_STUB,
        vec![FlowRoute::supply(RIGHT, input_rate(part), vec![liquid])],
    );
    // Anything pushed back into the inlet leaves the system.
    t.insert(RIGHT, vec![FlowRoute::drain(INPUT_STUB)]);
    t
}

fn output_transitions(_: &Part) -> Transitions {
    let mut t = Transitions::new();
    t.insert(LEFT, vec![FlowRoute::drain(OUTPUT_STUB)]);
    t
}

fn toggle_input(part: &mut Part) {
    part.disabled = !part.disabled;
}

pub fn input() -> PartSpec {
    PartSpec {
        type_id: "SystemInput",
        size: unit_size,
        transitions: input_transitions,
        interact: Some(toggle_input),
    }
}

pub fn output() -> PartSpec {
    PartSpec {
        type_id: "SystemOutput",
        size: unit_size,
        transitions: output_transitions,
        interact: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_liquids::HOT_WATER;

    #[test]
    fn input_supplies_configured_liquid() {
        let part = Part::new("SystemInput", 0, 0).with_setting("color", HOT_WATER.hex());
        let t = input_transitions(&part);
        let supply = &t[&INPUT_STUB][0];
        assert!(supply.source);
        assert_eq!(supply.pressure, DEFAULT_IO_PRESSURE);
        assert_eq!(supply.liquids, vec![HOT_WATER]);
    }

    #[test]
    fn disabled_input_is_passive() {
        let mut part = Part::new("SystemInput", 0, 0);
        part.disabled = true;
        let t = input_transitions(&part);
        let supply = &t[&INPUT_STUB][0];
        assert!(supply.source);
        assert_eq!(supply.pressure, 0.0);
    }

    #[test]
    fn output_is_a_sink() {
        let t = output_transitions(&Part::new("SystemOutput", 0, 0));
        assert!(t[&LEFT][0].sink);
    }
}
