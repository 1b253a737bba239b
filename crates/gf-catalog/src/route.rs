//! Flow route templates declared by part specifications.

use gf_geometry::GridPoint;
use gf_liquids::Liquid;
use std::collections::BTreeMap;

/// Friction of a plain passage.
pub const DEFAULT_FRICTION: f64 = 1.0;
/// Pressure a powered pump applies when its settings leave it unset.
pub const DEFAULT_PUMP_PRESSURE: f64 = 30.0;
/// Injection rate of a pressurized system inlet when unset.
pub const DEFAULT_IO_PRESSURE: f64 = 10.0;

/// A directed flow path from an origin point (the `Transitions` key) to a
/// destination point, in part-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRoute {
    /// Destination point of the route.
    pub out: GridPoint,
    /// Resistance to friction-weighted flow sharing.
    pub friction: f64,
    /// Fixed flow contribution, independent of sharing. For a plain pump
    /// route this is what drives the network; for a `source` route it is
    /// the declared injection rate (0 = passive reservoir).
    pub pressure: f64,
    /// Liquids injected by this route (sources only).
    pub liquids: Vec<Liquid>,
    /// Unconditionally supplies flow on demand.
    pub source: bool,
    /// Unconditionally absorbs whatever reaches it.
    pub sink: bool,
}

impl FlowRoute {
    /// A plain passage with default friction.
    pub fn passage(out: GridPoint) -> Self {
        Self {
            out,
            friction: DEFAULT_FRICTION,
            pressure: 0.0,
            liquids: Vec::new(),
            source: false,
            sink: false,
        }
    }

    /// A pump route: fixed pressure contribution in this direction.
    pub fn pressurized(out: GridPoint, pressure: f64) -> Self {
        Self {
            pressure,
            ..Self::passage(out)
        }
    }

    /// A source route supplying `liquids` at a declared rate
    /// (rate 0 = passive reservoir, supplies only on demand).
    pub fn supply(out: GridPoint, rate: f64, liquids: Vec<Liquid>) -> Self {
        Self {
            friction: 0.0,
            pressure: rate,
            liquids,
            source: true,
            ..Self::passage(out)
        }
    }

    /// A sink route absorbing all arriving flow.
    pub fn drain(out: GridPoint) -> Self {
        Self {
            friction: 0.0,
            sink: true,
            ..Self::passage(out)
        }
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }
}

/// A part's local flow behavior: origin point → outgoing routes.
///
/// Ordered map so iteration over assembled graphs is deterministic.
pub type Transitions = BTreeMap<GridPoint, Vec<FlowRoute>>;

/// Insert a bidirectional passage between two points.
pub fn both_ways(transitions: &mut Transitions, a: GridPoint, b: GridPoint) {
    transitions.entry(a).or_default().push(FlowRoute::passage(b));
    transitions.entry(b).or_default().push(FlowRoute::passage(a));
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_geometry::{LEFT, RIGHT, UP};

    #[test]
    fn passage_defaults() {
        let route = FlowRoute::passage(RIGHT);
        assert_eq!(route.friction, DEFAULT_FRICTION);
        assert_eq!(route.pressure, 0.0);
        assert!(!route.source && !route.sink);
        assert!(route.liquids.is_empty());
    }

    #[test]
    fn both_ways_inserts_pair() {
        let mut transitions = Transitions::new();
        both_ways(&mut transitions, LEFT, RIGHT);
        both_ways(&mut transitions, LEFT, UP);
        assert_eq!(transitions[&LEFT].len(), 2);
        assert_eq!(transitions[&RIGHT].len(), 1);
        assert_eq!(transitions[&RIGHT][0].out, LEFT);
    }
}
