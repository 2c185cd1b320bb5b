use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::amount::{Capacity, Weight};
use crate::edge::{Edge, EdgeId, RawEdge};
use crate::error::Error;
use crate::node::NodeId;

/// A directed graph whose edges carry a signed weight and a non-negative capacity.
///
/// Nodes and edges are kept in insertion order, which is the order both engines iterate them in.
/// Nodes are registered implicitly by the edges that reference them. Nothing is ever removed.
#[derive(Clone, Debug)]
pub struct Graph<N, W, C> {
    nodes: Vec<N>,
    index: BTreeMap<N, usize>,
    edges: Vec<Edge<N, W, C>>,
    // (tail, head) positions into `nodes`, parallel to `edges`
    ends: Vec<(usize, usize)>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl<N, W, C> Default for Graph<N, W, C> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: BTreeMap::new(),
            edges: Vec::new(),
            ends: Vec::new(),
            outgoing: Vec::new(),
        }
    }
}

impl<N, W, C> Graph<N, W, C>
where
    N: NodeId,
    W: Weight,
    C: Capacity,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an edge list, stopping at the first invalid edge.
    pub fn from_edges<I>(edges: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = RawEdge<N, W, C>>,
    {
        edges.into_iter().try_fold(Self::new(), |mut graph, raw| {
            graph.insert(Edge::try_from(raw)?);
            Ok(graph)
        })
    }

    /// Register `node` if it is new and return its insertion position.
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&pos) = self.index.get(&node) {
            return pos;
        }

        let pos = self.nodes.len();
        self.index.insert(node.clone(), pos);
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        pos
    }

    /// Append a new edge from `source` to `target`, registering both endpoints.
    ///
    /// The edge is validated before the graph is touched, so a rejected edge leaves no trace.
    pub fn add_edge(
        &mut self,
        source: N,
        target: N,
        weight: W,
        capacity: C,
    ) -> Result<EdgeId, Error> {
        let edge = Edge::new(source, target, weight, capacity)?;
        Ok(self.insert(edge))
    }

    pub fn insert(&mut self, edge: Edge<N, W, C>) -> EdgeId {
        let tail = self.add_node(edge.source().clone());
        let head = self.add_node(edge.target().clone());
        let id = EdgeId(self.edges.len());

        log::trace!(
            "edge #{} {:?} -> {:?} (weight {:?}, capacity {:?})",
            id.index(),
            edge.source(),
            edge.target(),
            edge.weight(),
            edge.capacity()
        );

        self.edges.push(edge);
        self.ends.push((tail, head));
        self.outgoing[tail].push(id);
        id
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge<N, W, C>> {
        self.edges.get(id.index())
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge<N, W, C>)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(pos, edge)| (EdgeId(pos), edge))
    }

    /// Edges leaving `node`, in insertion order. Empty if the node has none or is unknown.
    pub fn outgoing_edges(
        &self,
        node: &N,
    ) -> impl Iterator<Item = (EdgeId, &Edge<N, W, C>)> + '_ {
        self.index
            .get(node)
            .map_or(&[][..], |&pos| self.outgoing[pos].as_slice())
            .iter()
            .map(|&id| (id, &self.edges[id.index()]))
    }

    pub(crate) fn position(&self, node: &N) -> Result<usize, Error> {
        self.index.get(node).copied().ok_or(Error::UnknownNode)
    }

    /// Edges in insertion order as `(tail, head, edge)` with endpoints as node positions.
    pub(crate) fn arcs(&self) -> impl Iterator<Item = (usize, usize, &Edge<N, W, C>)> + '_ {
        self.ends
            .iter()
            .zip(&self.edges)
            .map(|(&(tail, head), edge)| (tail, head, edge))
    }
}
