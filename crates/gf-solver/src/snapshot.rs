//! Per-part solver results.

use gf_catalog::{Part, Transitions};
use gf_geometry::GridPoint;
use gf_liquids::{Liquid, Mixture};
use std::collections::BTreeMap;

/// One placed part annotated with its solved flows and liquids.
///
/// Flows are keyed by the part's own local points, so renderers and tests
/// never need the global frame. The sign convention: positive means net
/// flow enters the part at that point, negative means it leaves there.
#[derive(Debug, Clone)]
pub struct FlowPart {
    /// The input part, unchanged.
    pub part: Part,
    /// The part's routes in global coordinates, as the solver saw them.
    pub transitions: Transitions,
    pub(crate) flows: BTreeMap<GridPoint, f64>,
    pub(crate) liquids: BTreeMap<GridPoint, Mixture>,
}

impl FlowPart {
    /// Net flow at a local point; 0.0 for points without routes (closed
    /// valves, unknown types, untouched points).
    pub fn flow_at(&self, point: GridPoint) -> f64 {
        self.flows.get(&point).copied().unwrap_or(0.0)
    }

    /// The mixture present at a local point, if any liquid reaches it.
    pub fn liquid_at(&self, point: GridPoint) -> Option<&Mixture> {
        self.liquids.get(&point)
    }

    /// Render color for the liquid at a local point.
    pub fn color_at(&self, point: GridPoint) -> Option<Liquid> {
        self.liquid_at(point).map(Mixture::display_color)
    }

    /// All local points with a nonzero solved flow.
    pub fn flow_points(&self) -> impl Iterator<Item = (GridPoint, f64)> + '_ {
        self.flows.iter().map(|(p, f)| (*p, *f))
    }
}
