//! `pagewalk`: approximate PageRank-style random walks over directed edge lists.
//!
//! A [`RandomWalker`] moves over a [`DirectedGraph`] one step at a time. At each step it
//! follows a uniformly chosen out-link with probability `jump_prob`, and otherwise teleports
//! to a uniformly chosen node. Dead ends and self-loops force a teleport.
//!
//! Public invariants (must not drift):
//! - **Duplicates matter**: an edge recorded twice is twice as likely to be followed.
//! - **Node order**: [`DirectedGraph::nodes`] enumerates nodes in first-appearance order
//!   of the edge list, so seeded walks are reproducible across runs.
//! - **Walk length**: a walker emits exactly `step_limit + 1` nodes, then ends for good.
//! - **Determinism**: walks are deterministic given identical graph, start node and config.
//!
//! Visiting frequencies over long walks approximate PageRank scores; see [`VisitCounts`].

pub mod edgelist;
pub mod graph;
pub mod random_walk;
pub mod topk;
pub mod visits;

pub use edgelist::{describe_edge, parse_edges, read_edges};
pub use graph::{AdjacencyIndex, DirectedGraph, Edge, LinkGraph};
#[cfg(feature = "parallel")]
pub use random_walk::generate_walks_parallel;
pub use random_walk::{generate_walks, RandomWalker, WalkConfig, DEFAULT_STEP_LIMIT};
pub use topk::{normalize, top_k};
pub use visits::VisitCounts;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph has no nodes to walk over")]
    InvalidGraphReference,
    #[error("start node {0} is not in the graph")]
    InvalidStartNode(String),
    #[error("node {0} has no recorded out-links")]
    KeyNotFound(String),
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
