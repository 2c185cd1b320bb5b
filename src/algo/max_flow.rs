use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec;
use alloc::vec::Vec;

use serde::Serialize;

use crate::algo::MaxFlow;
use crate::amount::{Capacity, Weight};
use crate::edge::{Edge, EdgeId};
use crate::error::Error;
use crate::graph::Graph;
use crate::node::NodeId;

/// Flow carried by a single original edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeFlow<N, C> {
    pub edge: EdgeId,
    pub source: N,
    pub target: N,
    pub flow: C,
}

/// A maximum flow together with the per-edge assignment that realises it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowAssignment<N, C> {
    source: N,
    sink: N,
    value: C,
    // positive flows only, in edge insertion order
    flows: Vec<EdgeFlow<N, C>>,
    source_side: BTreeSet<N>,
}

impl<N: NodeId, C: Capacity> FlowAssignment<N, C> {
    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn value(&self) -> C {
        self.value
    }

    /// Edges carrying a positive flow, in the order they were added to the graph.
    pub fn edge_flows(&self) -> &[EdgeFlow<N, C>] {
        &self.flows
    }

    pub fn flow_on(&self, edge: EdgeId) -> C {
        self.flows
            .binary_search_by_key(&edge, |f| f.edge)
            .map_or(C::zero(), |pos| self.flows[pos].flow)
    }

    /// Total flow from `u` to `v` over all parallel edges.
    pub fn flow_between(&self, u: &N, v: &N) -> C {
        self.flows
            .iter()
            .filter(|f| &f.source == u && &f.target == v)
            .map(|f| f.flow)
            .sum()
    }

    /// Positive flows keyed by node pair, parallel edges summed.
    pub fn by_pair(&self) -> BTreeMap<(N, N), C> {
        self.flows.iter().fold(BTreeMap::new(), |mut acc, f| {
            *acc.entry((f.source.clone(), f.target.clone()))
                .or_insert_with(C::zero) += f.flow;
            acc
        })
    }

    /// Nodes still reachable from the source in the final residual graph, i.e. the source side
    /// of a minimum cut.
    pub fn source_side(&self) -> &BTreeSet<N> {
        &self.source_side
    }

    /// Edges of `graph` crossing the minimum cut. Their capacities add up to [`Self::value`].
    pub fn cut_edges<'g, W>(
        &'g self,
        graph: &'g Graph<N, W, C>,
    ) -> impl Iterator<Item = (EdgeId, &'g Edge<N, W, C>)> + 'g
    where
        W: Weight,
    {
        graph.edges().filter(move |(_, e)| {
            self.source_side.contains(e.source()) && !self.source_side.contains(e.target())
        })
    }
}

/// Residual arc. Arcs are stored in pairs: `2 * i` is the forward arc of original edge `i` and
/// `2 * i + 1` its reverse twin, so the twin of any arc `a` is `a ^ 1`.
#[derive(Clone, Copy)]
struct Arc<C> {
    head: usize,
    residual: C,
}

struct Residual<C> {
    arcs: Vec<Arc<C>>,
    // arcs leaving each node, in edge insertion order
    adjacency: Vec<Vec<usize>>,
}

/// Outcome of one breadth-first search over arcs with positive residual capacity.
struct Search {
    reached: Vec<bool>,
    // arc through which each node was first reached
    via: Vec<Option<usize>>,
}

impl<C: Capacity> Residual<C> {
    fn new<N, W>(graph: &Graph<N, W, C>) -> Self
    where
        N: NodeId,
        W: Weight,
    {
        let mut adjacency = vec![Vec::new(); graph.node_count()];
        let mut arcs = Vec::with_capacity(2 * graph.edge_count());

        for (tail, head, edge) in graph.arcs() {
            adjacency[tail].push(arcs.len());
            arcs.push(Arc {
                head,
                residual: edge.capacity(),
            });
            adjacency[head].push(arcs.len());
            arcs.push(Arc {
                head: tail,
                residual: C::zero(),
            });
        }

        Self { arcs, adjacency }
    }

    fn tail(&self, arc: usize) -> usize {
        self.arcs[arc ^ 1].head
    }

    fn search(&self, source: usize, sink: usize) -> Search {
        let mut reached = vec![false; self.adjacency.len()];
        let mut via = vec![None; self.adjacency.len()];
        let mut queue = VecDeque::from([source]);
        reached[source] = true;

        'bfs: while let Some(u) = queue.pop_front() {
            for &a in &self.adjacency[u] {
                let Arc { head, residual } = self.arcs[a];
                if reached[head] || residual <= C::zero() {
                    continue;
                }

                reached[head] = true;
                via[head] = Some(a);
                if head == sink {
                    break 'bfs;
                }
                queue.push_back(head);
            }
        }

        Search { reached, via }
    }

    /// Arcs from the source to `sink` along the search tree, in path order.
    fn path(&self, search: &Search, sink: usize) -> Option<Vec<usize>> {
        if !search.reached[sink] {
            return None;
        }

        let mut path = Vec::new();
        let mut node = sink;
        while let Some(a) = search.via[node] {
            path.push(a);
            node = self.tail(a);
        }
        path.reverse();
        Some(path)
    }

    fn push(&mut self, arc: usize, amount: C) {
        debug_assert!(self.arcs[arc].residual >= amount);
        self.arcs[arc].residual -= amount;
        self.arcs[arc ^ 1].residual += amount;
    }

    /// Flow carried by original edge `edge` of capacity `capacity`.
    fn flow(&self, edge: EdgeId, capacity: C) -> C {
        let forward = self.arcs[2 * edge.index()].residual;
        debug_assert!(forward <= capacity, "residual exceeds original capacity");
        if forward < capacity {
            capacity - forward
        } else {
            C::zero()
        }
    }
}

/// The Edmonds-Karp algorithm: Ford-Fulkerson with breadth-first (fewest arcs) augmenting paths.
///
/// Runs in O(V * E^2) regardless of the capacity values.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdmondsKarp;

impl<N, W, C> MaxFlow<N, W, C> for EdmondsKarp
where
    N: NodeId,
    W: Weight,
    C: Capacity,
{
    type Error = Error;

    fn max_flow(
        &mut self,
        graph: &Graph<N, W, C>,
        source: &N,
        sink: &N,
    ) -> Result<FlowAssignment<N, C>, Self::Error> {
        edmonds_karp(graph, source, sink)
    }
}

/// Computes a max flow from `source` to `sink` in `graph` using the Edmonds-Karp algorithm.
///
/// The graph is left untouched; augmentation happens on a private residual copy that is
/// dropped on return. Edge weights play no part.
///
/// Returns the flow value and the flow on every edge that carries some, plus the source side of
/// a minimum cut. Fails with [`Error::UnknownNode`] if either endpoint is missing from the
/// graph and with [`Error::InvalidEndpoints`] if they coincide.
pub fn edmonds_karp<N, W, C>(
    graph: &Graph<N, W, C>,
    source: &N,
    sink: &N,
) -> Result<FlowAssignment<N, C>, Error>
where
    N: NodeId,
    W: Weight,
    C: Capacity,
{
    let s = graph.position(source)?;
    let t = graph.position(sink)?;
    if s == t {
        return Err(Error::InvalidEndpoints);
    }

    let mut residual = Residual::new(graph);
    let mut value = C::zero();
    let mut augmentations = 0usize;

    let reached = loop {
        let search = residual.search(s, t);
        let Some(path) = residual.path(&search, t) else {
            break search.reached;
        };

        let Some(bottleneck) = path.iter().map(|&a| residual.arcs[a].residual).min() else {
            break search.reached;
        };

        path.iter().for_each(|&a| residual.push(a, bottleneck));
        value = value
            .checked_add(&bottleneck)
            .ok_or(Error::ArithmeticOverflow)?;
        augmentations += 1;

        log::trace!(
            "augmenting path of {} arcs carries {bottleneck}, total {value}",
            path.len()
        );
    };

    let flows = graph
        .edges()
        .map(|(id, edge)| (id, edge, residual.flow(id, edge.capacity())))
        .filter(|(_, _, flow)| *flow > C::zero())
        .map(|(id, edge, flow)| EdgeFlow {
            edge: id,
            source: edge.source().clone(),
            target: edge.target().clone(),
            flow,
        })
        .collect();

    let nodes = graph.nodes();
    let source_side = reached
        .iter()
        .enumerate()
        .filter(|(_, &r)| r)
        .map(|(pos, _)| nodes[pos].clone())
        .collect();

    log::debug!(
        "max flow {source:?} -> {sink:?}: {value} after {augmentations} augmenting paths"
    );

    Ok(FlowAssignment {
        source: source.clone(),
        sink: sink.clone(),
        value,
        flows,
        source_side,
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn sample() -> Graph<&'static str, i32, u32> {
        let mut graph = Graph::new();
        for (u, v, w, c) in [
            ("A", "B", 4, 5),
            ("A", "C", 2, 7),
            ("B", "C", -1, 3),
            ("B", "D", 2, 4),
            ("C", "D", 3, 6),
            ("C", "E", 2, 3),
            ("D", "E", -2, 8),
        ] {
            graph.add_edge(u, v, w, c).unwrap();
        }
        graph
    }

    fn flows(
        assignment: &FlowAssignment<&'static str, u32>,
    ) -> Vec<(&'static str, &'static str, u32)> {
        assignment
            .edge_flows()
            .iter()
            .map(|f| (f.source, f.target, f.flow))
            .collect()
    }

    #[test]
    fn sample_network() {
        let graph = sample();
        let mf = EdmondsKarp.max_flow(&graph, &"A", &"E").unwrap();

        assert_eq!(mf.value(), 11);
        assert_eq!(
            flows(&mf),
            vec![
                ("A", "B", 4),
                ("A", "C", 7),
                ("B", "D", 4),
                ("C", "D", 4),
                ("C", "E", 3),
                ("D", "E", 8),
            ]
        );
        assert_eq!(mf.flow_on(EdgeId(2)), 0);
        assert_eq!(mf.flow_on(EdgeId(6)), 8);
        assert_eq!(
            mf.source_side().iter().copied().collect::<Vec<_>>(),
            vec!["A", "B", "C", "D"]
        );

        let cut: u32 = mf.cut_edges(&graph).map(|(_, e)| e.capacity()).sum();
        assert_eq!(cut, 11);
    }

    #[test]
    fn graph_capacities_are_untouched() {
        let graph = sample();
        let before: Vec<u32> = graph.edges().map(|(_, e)| e.capacity()).collect();
        edmonds_karp(&graph, &"A", &"E").unwrap();
        let after: Vec<u32> = graph.edges().map(|(_, e)| e.capacity()).collect();

        assert_eq!(before, after);
    }

    #[test]
    fn invalid_endpoints() {
        let graph = sample();
        assert_eq!(
            edmonds_karp(&graph, &"A", &"A").unwrap_err(),
            Error::InvalidEndpoints
        );
        assert_eq!(
            edmonds_karp(&graph, &"A", &"Q").unwrap_err(),
            Error::UnknownNode
        );
        assert_eq!(
            edmonds_karp(&graph, &"Q", &"Q").unwrap_err(),
            Error::UnknownNode
        );
    }

    #[test]
    fn unreachable_sink_gives_zero_flow() {
        let graph = sample();
        let mf = edmonds_karp(&graph, &"E", &"A").unwrap();

        assert_eq!(mf.value(), 0);
        assert!(mf.edge_flows().is_empty());
        assert_eq!(mf.source_side().len(), 1);
    }

    #[test]
    fn parallel_edges_each_carry_flow() {
        let mut graph: Graph<char, i32, u64> = Graph::new();
        let first = graph.add_edge('s', 't', 0, 2).unwrap();
        let second = graph.add_edge('s', 't', 0, 3).unwrap();

        let mf = edmonds_karp(&graph, &'s', &'t').unwrap();
        assert_eq!(mf.value(), 5);
        assert_eq!(mf.flow_on(first), 2);
        assert_eq!(mf.flow_on(second), 3);
        assert_eq!(mf.flow_between(&'s', &'t'), 5);
        assert_eq!(mf.by_pair().get(&('s', 't')), Some(&5));
    }

    #[test]
    fn flow_is_rerouted_through_reverse_arcs() {
        // the first (shortest) path s-a-b-t blocks a->b; the second one has to undo it
        let mut graph: Graph<char, i32, u32> = Graph::new();
        for (u, v) in [
            ('s', 'a'),
            ('a', 'b'),
            ('b', 't'),
            ('s', 'c'),
            ('c', 'b'),
            ('a', 'e'),
            ('e', 'f'),
            ('f', 't'),
        ] {
            graph.add_edge(u, v, 0, 1).unwrap();
        }

        let mf = edmonds_karp(&graph, &'s', &'t').unwrap();
        assert_eq!(mf.value(), 2);
        assert_eq!(mf.flow_between(&'a', &'b'), 0);
        assert_eq!(mf.flow_between(&'c', &'b'), 1);
        assert_eq!(mf.flow_between(&'f', &'t'), 1);
    }

    #[test]
    fn zero_capacity_edges_carry_nothing() {
        let mut graph: Graph<u32, i32, u32> = Graph::new();
        graph.add_edge(0, 1, 1, 0).unwrap();
        graph.add_edge(1, 2, 1, 9).unwrap();

        let mf = edmonds_karp(&graph, &0, &2).unwrap();
        assert_eq!(mf.value(), 0);
        assert!(mf.edge_flows().is_empty());
    }

    #[test]
    fn residual_pairs_conserve_capacity() {
        let graph = sample();
        let mut residual = Residual::new(&graph);
        let search = residual.search(0, 4);
        let path = residual.path(&search, 4).unwrap();
        path.iter().for_each(|&a| residual.push(a, 2));

        for (id, edge) in graph.edges() {
            let forward = residual.arcs[2 * id.index()].residual;
            let reverse = residual.arcs[2 * id.index() + 1].residual;
            assert_eq!(forward + reverse, edge.capacity());
        }
    }

    #[test]
    fn repeated_runs_agree() {
        let graph = sample();
        assert_eq!(
            edmonds_karp(&graph, &"A", &"E"),
            edmonds_karp(&graph, &"A", &"E")
        );
    }

    #[test]
    fn flow_value_overflow_is_an_error() {
        let mut graph: Graph<u32, i32, u64> = Graph::new();
        graph.add_edge(0, 1, 0, u64::MAX).unwrap();
        graph.add_edge(0, 1, 0, 1).unwrap();

        assert_eq!(
            edmonds_karp(&graph, &0, &1).unwrap_err(),
            Error::ArithmeticOverflow
        );

        let mut graph: Graph<u32, i32, u64> = Graph::new();
        graph.add_edge(0, 1, 0, u64::MAX - 1).unwrap();
        graph.add_edge(0, 1, 0, 1).unwrap();

        assert_eq!(edmonds_karp(&graph, &0, &1).unwrap().value(), u64::MAX);
    }
}
