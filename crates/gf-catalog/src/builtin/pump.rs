//! Pump part.

use crate::builtin::unit_size;
use crate::error::CatalogError;
use crate::part::Part;
use crate::registry::PartSpec;
use crate::route::{DEFAULT_PUMP_PRESSURE, FlowRoute, Transitions};
use gf_geometry::{LEFT, RIGHT};
use tracing::warn;

/// Effective pump pressure: settings value when valid and powered,
/// default when unset, 0 when the part is disabled (a disabled pump is a
/// plain, unpowered pipe).
fn effective_pressure(part: &Part) -> f64 {
    if part.disabled {
        return 0.0;
    }
    match part.setting_f64("pressure") {
        Some(p) if p.is_finite() && p >= 0.0 => p,
        Some(_) => {
            let err = CatalogError::InvalidSettings {
                type_id: part.type_id.clone(),
                what: "pressure must be finite and non-negative",
            };
            warn!(%err, "using default pump pressure");
            DEFAULT_PUMP_PRESSURE
        }
        None => DEFAULT_PUMP_PRESSURE,
    }
}

fn pump_transitions(part: &Part) -> Transitions {
    let mut t = Transitions::new();
    // Free passage left-to-right; the powered direction pulls right-to-left.
    t.insert(LEFT, vec![FlowRoute::passage(RIGHT)]);
    t.insert(
        RIGHT,
        vec![FlowRoute::pressurized(LEFT, effective_pressure(part))],
    );
    t
}

fn toggle_power(part: &mut Part) {
    part.disabled = !part.disabled;
}

pub fn pump() -> PartSpec {
    PartSpec {
        type_id: "Pump",
        size: unit_size,
        transitions: pump_transitions,
        interact: Some(toggle_power),
    }
}
