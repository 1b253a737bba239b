//! Core flow-graph data structures.

use gf_core::{EdgeId, NodeId, PartId};
use gf_geometry::GridPoint;
use gf_liquids::Liquid;
use std::collections::BTreeMap;

/// A directed route instance in global coordinates.
///
/// Carries the originating part and the local origin/destination points so
/// computed flows can be written back into that part's own frame.
#[derive(Debug, Clone)]
pub struct FlowEdge {
    pub id: EdgeId,
    /// Index of the contributing part in the solve's part list.
    pub part: PartId,
    pub from: NodeId,
    pub to: NodeId,
    /// Route origin/destination in the part's local frame.
    pub from_local: GridPoint,
    pub to_local: GridPoint,
    pub friction: f64,
    pub pressure: f64,
    pub liquids: Vec<Liquid>,
    pub source: bool,
    pub sink: bool,
}

/// The assembled, immutable flow graph.
///
/// Nodes and edges live in vectors indexed by their IDs; adjacency is
/// stored as compact offset lists, deterministic by construction (parts in
/// input order, routes in their ordered transition maps).
#[derive(Debug, Clone)]
pub struct FlowGraph {
    pub(crate) points: Vec<GridPoint>,
    pub(crate) index: BTreeMap<GridPoint, NodeId>,
    pub(crate) edges: Vec<FlowEdge>,

    /// Edge i leaving node n is out_edges[out_offsets[n]..out_offsets[n+1]].
    pub(crate) out_offsets: Vec<usize>,
    pub(crate) out_edges: Vec<EdgeId>,
    pub(crate) in_offsets: Vec<usize>,
    pub(crate) in_edges: Vec<EdgeId>,

    /// Number of parts in the originating solve (including route-less ones).
    pub(crate) part_count: usize,
}

impl FlowGraph {
    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&FlowEdge> {
        self.edges.get(id.index() as usize)
    }

    pub fn part_count(&self) -> usize {
        self.part_count
    }

    /// The global point of a node.
    pub fn point(&self, node: NodeId) -> Option<GridPoint> {
        self.points.get(node.index() as usize).copied()
    }

    /// The node at a global point, if any route touches it.
    pub fn node_at(&self, point: GridPoint) -> Option<NodeId> {
        self.index.get(&point).copied()
    }

    /// Edge IDs leaving a node.
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        let idx = node.index() as usize;
        if idx >= self.points.len() {
            return &[];
        }
        &self.out_edges[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Edge IDs arriving at a node.
    pub fn incoming(&self, node: NodeId) -> &[EdgeId] {
        let idx = node.index() as usize;
        if idx >= self.points.len() {
            return &[];
        }
        &self.in_edges[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    /// A node with no outgoing routes is a dead end: flow must not be
    /// directed into it (implicit closed sink, infinite friction).
    pub fn is_dead_end(&self, node: NodeId) -> bool {
        self.outgoing(node).is_empty()
    }

    /// All dead-end nodes, in node order.
    pub fn dead_ends(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.points.len() as u32)
            .map(NodeId::from_index)
            .filter(|n| self.is_dead_end(*n))
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.points.len() as u32).map(NodeId::from_index)
    }
}
