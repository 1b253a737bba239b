//! gf-graph: global flow graph assembly for gridflow.
//!
//! Merges every placed part's transformed routes into one directed
//! multigraph. Nodes are grid points interned to compact IDs; edges keep
//! their originating part and route attributes so solver results can be
//! written back per part. Coincident endpoints from different parts merge
//! automatically because transforms are exact (see gf-geometry).
//!
//! # Example
//!
//! ```
//! use gf_catalog::{Catalog, Part};
//! use gf_graph::assemble;
//!
//! let catalog = Catalog::builtin();
//! let parts = vec![Part::new("StraightTube", 0, 0), Part::new("StraightTube", 1, 0)];
//! let graph = assemble(&parts, &catalog);
//!
//! // The shared boundary point merged into one node.
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edges().len(), 4);
//! ```

pub mod assemble;
pub mod graph;

pub use assemble::assemble;
pub use graph::{FlowEdge, FlowGraph};
