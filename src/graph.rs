//! Directed edge-list graphs and the adapter trait the walker consumes.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::ops::Add;

use crate::random_walk::{RandomWalker, WalkConfig};
use crate::{Error, Result};

/// A directed edge `source -> destination`.
pub type Edge<N> = (N, N);

/// Minimal read-only graph view for random walks.
///
/// This is the seam between walk logic and storage: a walker only needs the full node list
/// (for teleports) and each node's recorded out-links (for follow-link steps).
pub trait LinkGraph {
    type Node: Clone + Eq + Hash + fmt::Debug;

    /// All nodes, deduplicated. Teleports draw uniformly from this slice.
    fn nodes(&self) -> &[Self::Node];

    /// Out-links recorded for `node`, with repetition.
    ///
    /// `None` means the node has no entry (a sink, or not a node at all).
    fn links_from(&self, node: &Self::Node) -> Option<&[Self::Node]>;

    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Linear scan over [`nodes`](Self::nodes). Adapters that keep a hash index should
    /// override this, as [`DirectedGraph`] does.
    fn contains(&self, node: &Self::Node) -> bool {
        self.nodes().contains(node)
    }

    fn out_degree(&self, node: &Self::Node) -> usize {
        self.links_from(node).map_or(0, <[Self::Node]>::len)
    }
}

/// Source node -> ordered out-links, duplicates preserved.
///
/// Nodes that only ever appear as destinations get no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyIndex<N: Eq + Hash> {
    links: HashMap<N, Vec<N>>,
}

impl<N: Clone + Eq + Hash> AdjacencyIndex<N> {
    pub fn from_edges(edges: &[Edge<N>]) -> Self {
        let mut links: HashMap<N, Vec<N>> = HashMap::new();
        for (src, dst) in edges {
            links.entry(src.clone()).or_default().push(dst.clone());
        }
        Self { links }
    }
}

impl<N: Eq + Hash> AdjacencyIndex<N> {
    pub fn get(&self, node: &N) -> Option<&[N]> {
        self.links.get(node).map(Vec::as_slice)
    }

    pub fn contains_source(&self, node: &N) -> bool {
        self.links.contains_key(node)
    }

    /// Number of distinct sources.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// `(source, out-links)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &[N])> {
        self.links.iter().map(|(src, dsts)| (src, dsts.as_slice()))
    }
}

/// An immutable directed multigraph built from an edge list.
///
/// The edge list is kept as given; out-links and the node list are derived once at
/// construction and never change afterwards, so a `&DirectedGraph` can be shared freely
/// between walkers and threads.
#[derive(Debug, Clone)]
pub struct DirectedGraph<N: Eq + Hash> {
    edges: Vec<Edge<N>>,
    index: AdjacencyIndex<N>,
    nodes: Vec<N>,
    positions: HashMap<N, usize>,
}

impl<N> DirectedGraph<N>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge<N>>,
    {
        let edges: Vec<Edge<N>> = edges.into_iter().collect();
        let index = AdjacencyIndex::from_edges(&edges);

        // First-appearance order keeps teleport draws reproducible for a fixed seed.
        let mut nodes = Vec::new();
        let mut positions = HashMap::new();
        for (src, dst) in &edges {
            for node in [src, dst] {
                if let Entry::Vacant(slot) = positions.entry(node.clone()) {
                    slot.insert(nodes.len());
                    nodes.push(node.clone());
                }
            }
        }

        Self { edges, index, nodes, positions }
    }

    /// Number of edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Every source and destination, deduplicated, in first-appearance order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn node_set(&self) -> HashSet<&N> {
        self.nodes.iter().collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.positions.contains_key(node)
    }

    /// Recorded out-links of `node`, with repetition.
    ///
    /// Sinks are graph members without out-links, so they fail here too.
    pub fn out_links(&self, node: &N) -> Result<&[N]> {
        self.index
            .get(node)
            .ok_or_else(|| Error::KeyNotFound(format!("{node:?}")))
    }

    /// A new graph with this graph's edges followed by `other`'s.
    ///
    /// Edges present in both operands end up twice, which doubles their walk weight.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_edges(self.edges.iter().chain(other.edges.iter()).cloned())
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }

    pub fn edges(&self) -> &[Edge<N>] {
        &self.edges
    }

    pub fn adjacency(&self) -> &AdjacencyIndex<N> {
        &self.index
    }

    /// Start a walk over this graph from `start`.
    pub fn walker(&self, start: &N, config: WalkConfig) -> Result<RandomWalker<'_, Self>> {
        RandomWalker::new(self, start, config)
    }

    /// Convert to a `petgraph` multigraph with the same node order.
    #[cfg(feature = "petgraph")]
    pub fn to_petgraph(&self) -> petgraph::Graph<N, ()> {
        let mut g = petgraph::Graph::with_capacity(self.nodes.len(), self.edges.len());
        let ids: Vec<_> = self.nodes.iter().map(|n| g.add_node(n.clone())).collect();
        for (src, dst) in &self.edges {
            g.add_edge(ids[self.positions[src]], ids[self.positions[dst]], ());
        }
        g
    }
}

impl<N> LinkGraph for DirectedGraph<N>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    type Node = N;

    fn nodes(&self) -> &[N] {
        &self.nodes
    }

    fn links_from(&self, node: &N) -> Option<&[N]> {
        self.index.get(node)
    }

    fn contains(&self, node: &N) -> bool {
        self.positions.contains_key(node)
    }
}

impl<N: Eq + Hash> fmt::Display for DirectedGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DirectedGraph with {} nodes and {} edges.",
            self.nodes.len(),
            self.edges.len()
        )
    }
}

impl<N> Add for DirectedGraph<N>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let mut edges = self.edges;
        edges.extend(other.edges);
        Self::from_edges(edges)
    }
}

impl<N> FromIterator<Edge<N>> for DirectedGraph<N>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    fn from_iter<I: IntoIterator<Item = Edge<N>>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<Edge<String>> {
        pairs.iter().map(|&(a, b)| (a.to_string(), b.to_string())).collect()
    }

    #[test]
    fn adjacency_keeps_order_and_duplicates() {
        let e = edges(&[("a", "b"), ("a", "c"), ("b", "a"), ("a", "b")]);
        let idx = AdjacencyIndex::from_edges(&e);

        assert_eq!(idx.len(), 2);
        let a = idx.get(&"a".to_string()).unwrap();
        assert_eq!(a, &["b".to_string(), "c".to_string(), "b".to_string()]);
        assert_eq!(idx.get(&"b".to_string()).unwrap(), &["a".to_string()]);
    }

    #[test]
    fn adjacency_has_no_entry_for_pure_destinations() {
        let idx = AdjacencyIndex::from_edges(&edges(&[("a", "sink")]));
        assert!(idx.contains_source(&"a".to_string()));
        assert!(!idx.contains_source(&"sink".to_string()));
        assert!(idx.get(&"sink".to_string()).is_none());
    }

    #[test]
    fn triangle_nodes_and_edge_count() {
        let g = DirectedGraph::from_edges(edges(&[("A", "B"), ("B", "C"), ("C", "A")]));
        let expected: HashSet<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let got: HashSet<String> = g.nodes().iter().cloned().collect();
        assert_eq!(got, expected);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn nodes_follow_first_appearance() {
        let g = DirectedGraph::from_edges(vec![(3, 1), (1, 2), (2, 3), (4, 4)]);
        assert_eq!(g.nodes(), &[3, 1, 2, 4]);
    }

    #[test]
    fn contains_includes_sinks() {
        let g = DirectedGraph::from_edges(edges(&[("a", "sink")]));
        assert!(g.contains(&"a".to_string()));
        assert!(g.contains(&"sink".to_string()));
        assert!(!g.contains(&"nobody".to_string()));
    }

    #[test]
    fn out_links_of_sink_is_key_not_found() {
        let g = DirectedGraph::from_edges(edges(&[("a", "sink")]));
        assert_eq!(g.out_links(&"a".to_string()).unwrap(), &["sink".to_string()]);
        let err = g.out_links(&"sink".to_string()).unwrap_err();
        assert!(matches!(err, Error::KeyNotFound(_)), "{err:?}");
    }

    #[test]
    fn union_concatenates_edges() {
        let a = DirectedGraph::from_edges(edges(&[("A", "B")]));
        let b = DirectedGraph::from_edges(edges(&[("A", "B")]));
        let u = a.union(&b);
        assert_eq!(u.edge_count(), 2);
        assert_eq!(u.node_count(), 2);
        assert_eq!(u.out_links(&"A".to_string()).unwrap().len(), 2);
        // Operands are untouched.
        assert_eq!(a.edge_count(), 1);
        assert_eq!(b.edge_count(), 1);

        let summed = a + b;
        assert_eq!(summed.edges(), u.edges());
    }

    #[test]
    fn describe_counts_nodes_and_edges() {
        let g = DirectedGraph::from_edges(edges(&[("A", "B"), ("A", "B"), ("B", "C")]));
        assert_eq!(g.describe(), "DirectedGraph with 3 nodes and 3 edges.");
        assert_eq!(format!("{g}"), g.describe());
    }

    #[test]
    fn empty_graph() {
        let g: DirectedGraph<String> = DirectedGraph::from_edges(Vec::new());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.adjacency().is_empty());
        assert_eq!(g.describe(), "DirectedGraph with 0 nodes and 0 edges.");
    }

    #[test]
    fn link_graph_out_degree_counts_repeats() {
        let g: DirectedGraph<u32> = vec![(0, 1), (0, 1), (0, 2)].into_iter().collect();
        assert_eq!(LinkGraph::out_degree(&g, &0), 3);
        assert_eq!(LinkGraph::out_degree(&g, &1), 0);
    }

    struct NodeList(Vec<u32>);

    impl LinkGraph for NodeList {
        type Node = u32;

        fn nodes(&self) -> &[u32] {
            &self.0
        }

        fn links_from(&self, _node: &u32) -> Option<&[u32]> {
            None
        }
    }

    #[test]
    fn default_contains_agrees_with_indexed_override() {
        let g: DirectedGraph<u32> = vec![(0, 1), (1, 2), (5, 5)].into_iter().collect();
        let list = NodeList(g.nodes().to_vec());
        for node in 0..8u32 {
            assert_eq!(LinkGraph::contains(&list, &node), LinkGraph::contains(&g, &node), "{node}");
        }
    }

    #[cfg(feature = "petgraph")]
    #[test]
    fn petgraph_conversion_keeps_parallel_edges() {
        let g = DirectedGraph::from_edges(vec![("a", "b"), ("a", "b"), ("b", "c")]);
        let pg = g.to_petgraph();
        assert_eq!(pg.node_count(), 3);
        assert_eq!(pg.edge_count(), 3);
        assert_eq!(pg[petgraph::graph::NodeIndex::new(0)], "a");
    }
}
