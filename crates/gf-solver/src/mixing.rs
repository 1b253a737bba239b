//! Liquid identity propagation along settled flows.
//!
//! Runs after flow relaxation. Supply routes contribute their declared
//! liquids; every other route carries the mixture of its origin node.
//! Node mixtures are the flow-weighted blend of arriving routes, iterated
//! to a fixed point (cycles make a single sweep insufficient).

use crate::config::SolverConfig;
use crate::relax::EdgeFlows;
use gf_core::numeric::Tolerances;
use gf_graph::FlowGraph;
use gf_liquids::Mixture;

/// Resolve the mixture present at every node. `None` means no liquid
/// reaches that point.
pub fn resolve_liquids(
    graph: &FlowGraph,
    flows: &EdgeFlows,
    config: &SolverConfig,
) -> Vec<Option<Mixture>> {
    let edges = graph.edges();

    // Declared mixtures of supply routes, with equal weights per liquid.
    let declared: Vec<Option<Mixture>> = edges
        .iter()
        .map(|e| {
            if e.source && !e.liquids.is_empty() {
                Mixture::from_weights(e.liquids.iter().map(|l| (*l, 1.0)).collect()).ok()
            } else {
                None
            }
        })
        .collect();

    let tol = Tolerances::default();
    let mut mix: Vec<Option<Mixture>> = vec![None; graph.node_count()];

    for _ in 0..config.max_rounds {
        let mut changed = false;

        for node in graph.nodes() {
            let node_idx = node.index() as usize;
            let blended = {
                let arrivals = graph.incoming(node).iter().filter_map(|id| {
                    let i = id.index() as usize;
                    let carried = flows.carried(*id);
                    if carried <= config.tolerance {
                        return None;
                    }
                    let mixture = if edges[i].source {
                        declared[i].as_ref()
                    } else {
                        mix[edges[i].from.index() as usize].as_ref()
                    };
                    mixture.map(|m| (carried, m))
                });
                Mixture::blend(arrivals)
            };

            let same = match (&mix[node_idx], &blended) {
                (None, None) => true,
                (Some(a), Some(b)) => a.nearly_same(b, tol),
                _ => false,
            };
            if !same {
                mix[node_idx] = blended;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    mix
}
