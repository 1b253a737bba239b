//! Iterative flow relaxation over the assembled graph.
//!
//! Flows are relaxed in bounded rounds. Each round recomputes two fields
//! from the previous one:
//!
//! * a push field: declared injections (pressurized sources, pump bases)
//!   travel downstream, redistributed at every node across outgoing routes
//!   with pressure-bearing routes filled first and the remainder shared by
//!   inverse friction;
//! * a pull field: pump suction demand travels upstream across passive
//!   routes until a supply route absorbs it.
//!
//! A pump only moves liquid: its base discharge is suppressed when nothing
//! on its suction side can ever feed it, so it still passes co-pushed flow
//! but injects none of its own.
//!
//! Flow never reflects back along the segment it arrived on, and routes
//! that cannot reach an absorber (or, for pulls, a supply) are skipped, so
//! branches ending in open points stay dry. Opposing flows over the same
//! node pair cancel by superposition when results are read out.

use crate::config::SolverConfig;
use gf_core::EdgeId;
use gf_graph::{FlowEdge, FlowGraph};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Frictions below this are clamped when used as weights.
const FRICTION_FLOOR: f64 = 1e-6;

/// An unordered node pair; opposing routes over the same pair share one.
type Segment = (u32, u32);

fn segment(edge: &FlowEdge) -> Segment {
    let a = edge.from.index();
    let b = edge.to.index();
    if a <= b { (a, b) } else { (b, a) }
}

fn is_pump(edge: &FlowEdge) -> bool {
    edge.pressure > 0.0 && !edge.source
}

/// Relaxed per-edge flows.
#[derive(Debug, Clone)]
pub struct EdgeFlows {
    signed: Vec<f64>,
    /// False when the round budget ran out before convergence.
    pub stable: bool,
    /// Rounds actually spent.
    pub rounds: usize,
}

impl EdgeFlows {
    /// Net flow along an edge after superposition with opposing routes.
    /// Positive means flow in the edge's declared direction.
    pub fn signed(&self, id: EdgeId) -> f64 {
        self.signed.get(id.index() as usize).copied().unwrap_or(0.0)
    }

    /// Flow actually carried in the edge's direction (never negative).
    pub fn carried(&self, id: EdgeId) -> f64 {
        self.signed(id).max(0.0)
    }
}

/// Relax the graph until flows stop changing or the round budget is spent.
pub fn relax(graph: &FlowGraph, config: &SolverConfig) -> EdgeFlows {
    let edges = graph.edges();
    let m = edges.len();

    let can_exit = exit_reachability(graph);
    let can_feed = feed_reachability(graph);

    // A pump with nothing feedable on its suction side moves no liquid of
    // its own (it conserves flow at its origin node). Own-segment routes
    // do not count: a pump cannot suck its own discharge back.
    let fed: Vec<bool> = edges
        .iter()
        .map(|e| {
            if !is_pump(e) {
                return true;
            }
            graph.incoming(e.from).iter().any(|id| {
                let j = id.index() as usize;
                !edges[j].sink && segment(&edges[j]) != segment(e) && can_feed[j]
            })
        })
        .collect();

    let mut push = vec![0.0_f64; m];
    let mut through = vec![0.0_f64; m];
    let mut total = vec![0.0_f64; m];
    // Pull demand relayed upstream, keyed by (node, arrival segment).
    let mut relay: BTreeMap<(u32, Segment), f64> = BTreeMap::new();

    let mut stable = false;
    let mut rounds = 0;

    for round in 1..=config.max_rounds {
        rounds = round;

        // Effective pressures: pumps gain a bonus from co-moving flow,
        // saturating at their own rating. Supplies inject a fixed rate.
        let p_eff: Vec<f64> = edges
            .iter()
            .enumerate()
            .map(|(i, e)| {
                if e.pressure <= 0.0 {
                    0.0
                } else if e.source {
                    e.pressure
                } else {
                    e.pressure
                        + config.pump_acceleration * through[i].min(e.pressure)
                }
            })
            .collect();

        // Push phase: redistribute last round's deliveries node by node.
        let mut new_push = vec![0.0_f64; m];
        let mut new_through = vec![0.0_f64; m];
        for (i, e) in edges.iter().enumerate() {
            if e.source && e.pressure > 0.0 {
                new_push[i] = p_eff[i];
            }
        }
        for node in graph.nodes() {
            for &id in graph.incoming(node) {
                let e = &edges[id.index() as usize];
                let delivery = push[id.index() as usize];
                if e.sink || delivery <= 0.0 {
                    continue;
                }
                distribute(
                    graph,
                    &p_eff,
                    &can_exit,
                    node.index() as usize,
                    delivery,
                    segment(e),
                    &mut new_push,
                    &mut new_through,
                );
            }
        }
        for (i, e) in edges.iter().enumerate() {
            if is_pump(e) {
                new_push[i] = new_through[i] + if fed[i] { p_eff[i] } else { 0.0 };
            }
        }

        // Pull phase: pump bases demand flow at their origin; unmet demand
        // walks one segment upstream per round until a supply absorbs it.
        let mut demands: BTreeMap<(u32, Segment), f64> = relay;
        relay = BTreeMap::new();
        for (i, e) in edges.iter().enumerate() {
            if is_pump(e) && fed[i] {
                *demands.entry((e.from.index(), segment(e))).or_insert(0.0) += p_eff[i];
            }
        }

        let mut new_pull = vec![0.0_f64; m];
        for ((node_idx, banned), amount) in demands {
            let node = gf_core::NodeId::from_index(node_idx);
            let candidates: Vec<usize> = graph
                .incoming(node)
                .iter()
                .map(|id| id.index() as usize)
                .filter(|&i| {
                    let e = &edges[i];
                    !e.sink && !is_pump(e) && segment(e) != banned && can_feed[i]
                })
                .collect();

            let sources: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&i| edges[i].source)
                .collect();

            if !sources.is_empty() {
                let share = amount / sources.len() as f64;
                for i in sources {
                    new_pull[i] += share;
                }
            } else if !candidates.is_empty() {
                let weights: Vec<f64> = candidates
                    .iter()
                    .map(|&i| 1.0 / edges[i].friction.max(FRICTION_FLOOR))
                    .collect();
                let sum: f64 = weights.iter().sum();
                for (&i, w) in candidates.iter().zip(&weights) {
                    let share = amount * w / sum;
                    new_pull[i] += share;
                    *relay
                        .entry((edges[i].from.index(), segment(&edges[i])))
                        .or_insert(0.0) += share;
                }
            }
            // No candidates: the demand goes unmet and flows stay partial.
        }

        // Convergence: largest per-edge change between rounds.
        let mut delta = 0.0_f64;
        for i in 0..m {
            let t = new_push[i] + new_pull[i];
            delta = delta.max((t - total[i]).abs());
            total[i] = t;
        }
        push = new_push;
        through = new_through;

        trace!(round, delta, "relaxation round");
        if delta < config.tolerance {
            stable = true;
            break;
        }
    }

    if !stable {
        debug!(rounds, "round budget spent before convergence");
    }

    EdgeFlows {
        signed: superpose(graph, &total),
        stable,
        rounds,
    }
}

/// Spread one delivery across a node's outgoing routes.
///
/// Routes over the arrival segment are excluded (no reflection). Pressure
/// routes fill to capacity first; the remainder is shared by inverse
/// friction among routes that can reach an absorber.
#[allow(clippy::too_many_arguments)]
fn distribute(
    graph: &FlowGraph,
    p_eff: &[f64],
    can_exit: &[bool],
    node_idx: usize,
    amount: f64,
    banned: Segment,
    new_push: &mut [f64],
    new_through: &mut [f64],
) {
    let edges = graph.edges();
    let node = gf_core::NodeId::from_index(node_idx as u32);
    let candidates: Vec<usize> = graph
        .outgoing(node)
        .iter()
        .map(|id| id.index() as usize)
        .filter(|&i| segment(&edges[i]) != banned)
        .collect();
    if candidates.is_empty() {
        return;
    }

    let mut remaining = amount;
    for &i in &candidates {
        if is_pump(&edges[i]) && can_exit[i] {
            let headroom = (p_eff[i] - new_through[i]).max(0.0);
            let take = remaining.min(headroom);
            new_through[i] += take;
            remaining -= take;
        }
    }
    if remaining <= 0.0 {
        return;
    }

    let weights: Vec<f64> = candidates
        .iter()
        .map(|&i| {
            if can_exit[i] {
                1.0 / edges[i].friction.max(FRICTION_FLOOR)
            } else {
                0.0
            }
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return;
    }
    for (&i, w) in candidates.iter().zip(&weights) {
        let share = remaining * w / sum;
        if is_pump(&edges[i]) {
            new_through[i] += share;
        } else {
            new_push[i] += share;
        }
    }
}

/// Per-edge flag: can flow entering this edge eventually reach a sink
/// route without reflecting back along a segment it just crossed?
fn exit_reachability(graph: &FlowGraph) -> Vec<bool> {
    edge_fixpoint(graph, |e| e.sink, true)
}

/// Per-edge flag: can a pull along this edge eventually be satisfied by a
/// supply route or a pump discharge upstream?
fn feed_reachability(graph: &FlowGraph) -> Vec<bool> {
    edge_fixpoint(graph, |e| e.source || e.pressure > 0.0, false)
}

fn edge_fixpoint(
    graph: &FlowGraph,
    root: impl Fn(&FlowEdge) -> bool,
    downstream: bool,
) -> Vec<bool> {
    let edges = graph.edges();
    let mut reach: Vec<bool> = edges.iter().map(root).collect();
    loop {
        let mut changed = false;
        for (i, e) in edges.iter().enumerate() {
            if reach[i] {
                continue;
            }
            let continuations = if downstream {
                graph.outgoing(e.to)
            } else {
                graph.incoming(e.from)
            };
            let found = continuations.iter().any(|id| {
                let j = id.index() as usize;
                reach[j] && segment(&edges[j]) != segment(e)
            });
            if found {
                reach[i] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    reach
}

/// Net opposing flows over each node pair and hand back signed per-edge
/// values, proportional to each edge's share of its direction.
fn superpose(graph: &FlowGraph, total: &[f64]) -> Vec<f64> {
    let edges = graph.edges();
    // Directional totals per segment: (low->high, high->low).
    let mut by_segment: BTreeMap<Segment, (f64, f64)> = BTreeMap::new();
    for (i, e) in edges.iter().enumerate() {
        let entry = by_segment.entry(segment(e)).or_insert((0.0, 0.0));
        if e.from.index() <= e.to.index() {
            entry.0 += total[i];
        } else {
            entry.1 += total[i];
        }
    }

    edges
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let (fwd, rev) = by_segment[&segment(e)];
            let (own_dir, opposite) = if e.from.index() <= e.to.index() {
                (fwd, rev)
            } else {
                (rev, fwd)
            };
            if own_dir > 0.0 {
                total[i] - opposite * (total[i] / own_dir)
            } else {
                0.0
            }
        })
        .collect()
}
