//! Valve parts: manual, one-way, and externally actuated.

use crate::builtin::unit_size;
use crate::part::Part;
use crate::registry::PartSpec;
use crate::route::{FlowRoute, Transitions, both_ways};
use gf_geometry::{LEFT, RIGHT};
use serde_json::Value;

fn open_transitions(_: &Part) -> Transitions {
    let mut t = Transitions::new();
    both_ways(&mut t, LEFT, RIGHT);
    t
}

fn toggle_closed(part: &mut Part) {
    part.closed = !part.closed;
}

fn check_valve_transitions(_: &Part) -> Transitions {
    // One direction only: flow may enter at LEFT and leave at RIGHT.
    let mut t = Transitions::new();
    t.insert(LEFT, vec![FlowRoute::passage(RIGHT)]);
    t
}

/// The actuated valve follows the externally written `state` setting:
/// the live device layer resolves the actuator's actual position into
/// settings before each solve.
fn actuator_transitions(part: &Part) -> Transitions {
    if part.setting_bool("state").unwrap_or(false) {
        open_transitions(part)
    } else {
        Transitions::new()
    }
}

/// Toggling an actuated valve writes the desired state; the device layer
/// echoes the actual state back into `state` once the hardware follows.
fn toggle_desired_state(part: &mut Part) {
    let desired = !part.setting_bool("desiredState").unwrap_or_else(|| {
        part.setting_bool("state").unwrap_or(false)
    });
    part.settings
        .insert("desiredState".to_string(), Value::Bool(desired));
}

pub fn valve() -> PartSpec {
    PartSpec {
        type_id: "Valve",
        size: unit_size,
        transitions: open_transitions,
        interact: Some(toggle_closed),
    }
}

pub fn check_valve() -> PartSpec {
    PartSpec {
        type_id: "CheckValve",
        size: unit_size,
        transitions: check_valve_transitions,
        interact: None,
    }
}

pub fn actuator_valve() -> PartSpec {
    PartSpec {
        type_id: "ActuatorValve",
        size: unit_size,
        transitions: actuator_transitions,
        interact: Some(toggle_desired_state),
    }
}
