//! Container parts (kettles and other vessels).

use crate::error::CatalogError;
use crate::part::Part;
use crate::registry::PartSpec;
use crate::route::{FlowRoute, Transitions};
use gf_geometry::GridPoint;
use gf_liquids::Liquid;
use tracing::warn;

pub const DEFAULT_SIZE_X: u32 = 4;
pub const DEFAULT_SIZE_Y: u32 = 6;
pub const MIN_SIZE: u32 = 2;
pub const MAX_SIZE: u32 = 10;

/// Read a size setting, falling back to the declared default when the
/// value is missing, non-integer, or out of range.
fn size_setting(part: &Part, key: &str, default: u32) -> u32 {
    match part.setting_f64(key) {
        None => default,
        Some(v) if v.fract() == 0.0 && (MIN_SIZE as f64..=MAX_SIZE as f64).contains(&v) => v as u32,
        Some(_) => {
            let err = CatalogError::InvalidSettings {
                type_id: part.type_id.clone(),
                what: "vessel sizes must be whole cells between 2 and 10",
            };
            warn!(%err, key, "using default size");
            default
        }
    }
}

fn kettle_size(part: &Part) -> (u32, u32) {
    (
        size_setting(part, "sizeX", DEFAULT_SIZE_X),
        size_setting(part, "sizeY", DEFAULT_SIZE_Y),
    )
}

/// Every footprint cell exposes its center as a passive reservoir: a
/// frictionless sink absorbs arriving liquid, and a rate-0 source
/// supplies the vessel's liquid on demand.
pub fn container_transitions(size: (u32, u32), liquid: Option<Liquid>) -> Transitions {
    let mut t = Transitions::new();
    let liquids = liquid.into_iter().collect::<Vec<_>>();
    for cy in 0..size.1 as i32 {
        for cx in 0..size.0 as i32 {
            let center = GridPoint::from_tenths(cx * 10 + 5, cy * 10 + 5);
            let reservoir = GridPoint::from_tenths(cx * 10 + 1, cy * 10 + 1);
            t.insert(center, vec![FlowRoute::drain(reservoir)]);
            t.insert(reservoir, vec![FlowRoute::supply(center, 0.0, liquids.clone())]);
        }
    }
    t
}

fn kettle_transitions(part: &Part) -> Transitions {
    container_transitions(kettle_size(part), part.supply_liquid())
}

pub fn kettle() -> PartSpec {
    PartSpec {
        type_id: "Kettle",
        size: kettle_size,
        transitions: kettle_transitions,
        interact: None,
    }
}
