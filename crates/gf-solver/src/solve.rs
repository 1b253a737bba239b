//! The solve entry points.

use crate::config::SolverConfig;
use crate::mixing::resolve_liquids;
use crate::relax::relax;
use crate::snapshot::FlowPart;
use gf_catalog::{Catalog, Part, Transitions};
use gf_geometry::GridPoint;
use gf_graph::assemble;
use gf_liquids::Mixture;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The complete result of one solve.
#[derive(Debug, Clone)]
pub struct Solution {
    /// One entry per input part, in input order.
    pub parts: Vec<FlowPart>,
    /// False when the solver ran out of rounds before flows settled; the
    /// reported flows are then the best estimate, never an error.
    pub stable: bool,
    /// Relaxation rounds spent.
    pub rounds: usize,
}

/// Solve a layout with default settings.
///
/// Never fails: malformed parts degrade to inert ones and non-convergence
/// is reported through [`Solution::stable`].
pub fn solve(parts: &[Part], catalog: &Catalog) -> Solution {
    solve_with(parts, catalog, &SolverConfig::default())
}

/// Solve a layout with explicit solver settings.
pub fn solve_with(parts: &[Part], catalog: &Catalog, config: &SolverConfig) -> Solution {
    let graph = assemble(parts, catalog);
    let flows = relax(&graph, config);
    if flows.stable {
        debug!(rounds = flows.rounds, "flows settled");
    } else {
        warn!(
            rounds = flows.rounds,
            "flows did not settle within the round budget"
        );
    }
    let mixes = resolve_liquids(&graph, &flows, config);

    let mut flow_maps: Vec<BTreeMap<GridPoint, f64>> = vec![BTreeMap::new(); parts.len()];
    let mut liquid_maps: Vec<BTreeMap<GridPoint, Mixture>> =
        vec![BTreeMap::new(); parts.len()];

    for edge in graph.edges() {
        let signed = flows.signed(edge.id);
        let part_idx = edge.part.index() as usize;
        *flow_maps[part_idx].entry(edge.from_local).or_insert(0.0) += signed;
        *flow_maps[part_idx].entry(edge.to_local).or_insert(0.0) -= signed;

        for (local, node) in [(edge.from_local, edge.from), (edge.to_local, edge.to)] {
            if let Some(mix) = &mixes[node.index() as usize] {
                liquid_maps[part_idx]
                    .entry(local)
                    .or_insert_with(|| mix.clone());
            }
        }
    }

    let flow_parts = parts
        .iter()
        .zip(flow_maps.into_iter().zip(liquid_maps))
        .map(|(part, (flows, liquids))| FlowPart {
            part: part.clone(),
            transitions: global_transitions(part, catalog),
            flows,
            liquids,
        })
        .collect();

    Solution {
        parts: flow_parts,
        stable: flows.stable,
        rounds: flows.rounds,
    }
}

/// A part's derived routes, translated into the global frame.
fn global_transitions(part: &Part, catalog: &Catalog) -> Transitions {
    let placement = catalog.placement(part);
    catalog
        .transitions_for(part)
        .into_iter()
        .map(|(origin, routes)| {
            let routes = routes
                .into_iter()
                .map(|mut route| {
                    route.out = placement.local_to_global(route.out);
                    route
                })
                .collect();
            (placement.local_to_global(origin), routes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_geometry::{LEFT, RIGHT};

    #[test]
    fn every_part_gets_a_snapshot() {
        let catalog = Catalog::builtin();
        let mut valve = Part::new("Valve", 0, 0);
        valve.closed = true;
        let parts = vec![valve, Part::new("Teleporter", 1, 0)];

        let solution = solve(&parts, &catalog);
        assert_eq!(solution.parts.len(), 2);
        assert!(solution.stable);
        for snapshot in &solution.parts {
            assert_eq!(snapshot.flow_at(LEFT), 0.0);
            assert_eq!(snapshot.flow_at(RIGHT), 0.0);
        }
    }

    #[test]
    fn tube_flow_enters_left_and_leaves_right() {
        let catalog = Catalog::builtin();
        let parts = vec![
            Part::new("SystemInput", 0, 0),
            Part::new("StraightTube", 1, 0),
            Part::new("SystemOutput", 2, 0),
        ];

        let solution = solve(&parts, &catalog);
        assert!(solution.stable);

        let tube = &solution.parts[1];
        assert!((tube.flow_at(LEFT) - 10.0).abs() < 1e-6);
        assert!((tube.flow_at(RIGHT) + 10.0).abs() < 1e-6);
    }

    #[test]
    fn transitions_are_reported_in_global_coordinates() {
        let catalog = Catalog::builtin();
        let parts = vec![Part::new("StraightTube", 3, 2)];

        let solution = solve(&parts, &catalog);
        let tube = &solution.parts[0];
        assert!(
            tube.transitions
                .contains_key(&GridPoint::from_tenths(30, 25))
        );
        assert!(
            tube.transitions
                .contains_key(&GridPoint::from_tenths(40, 25))
        );
    }

    #[test]
    fn tight_round_budget_is_reported_not_fatal() {
        let catalog = Catalog::builtin();
        let parts = vec![
            Part::new("SystemInput", 0, 0),
            Part::new("StraightTube", 1, 0),
            Part::new("SystemOutput", 2, 0),
        ];
        let config = SolverConfig {
            max_rounds: 1,
            ..SolverConfig::default()
        };

        let solution = solve_with(&parts, &catalog, &config);
        assert!(!solution.stable);
        assert_eq!(solution.rounds, 1);
    }
}
