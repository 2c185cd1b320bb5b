#![no_std]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

mod algo;
mod amount;
mod edge;
mod error;
mod graph;
mod node;

pub use crate::algo::max_flow::{edmonds_karp, EdgeFlow, EdmondsKarp, FlowAssignment};
pub use crate::algo::shortest_path::{BellmanFord, Distance, ShortestPaths};
pub use crate::algo::{MaxFlow, ShortestPath};
pub use crate::amount::{Capacity, Weight};
pub use crate::edge::{Edge, EdgeId, RawEdge};
pub use crate::error::Error;
pub use crate::graph::Graph;
pub use crate::node::NodeId;

/// Shortest distances and paths from `source` to every node of `graph`.
///
/// Uses [`BellmanFord`], so negative weights are fine. Fails with [`Error::UnknownNode`] if
/// `source` is not in the graph and with [`Error::NegativeCycleDetected`] if a negative-weight
/// cycle can be reached from it. A distance that leaves the range of `W` gives
/// [`Error::ArithmeticOverflow`].
pub fn shortest_paths<N, W, C>(
    graph: &Graph<N, W, C>,
    source: &N,
) -> Result<ShortestPaths<N, W>, Error>
where
    N: NodeId,
    W: Weight,
    C: Capacity,
{
    BellmanFord.shortest_paths(graph, source)
}

/// Maximum flow from `source` to `sink` and the per-edge flows realising it.
///
/// Uses [`EdmondsKarp`]. Fails with [`Error::UnknownNode`] or [`Error::InvalidEndpoints`], and
/// with [`Error::ArithmeticOverflow`] if the flow value does not fit in `C`.
pub fn maximum_flow<N, W, C>(
    graph: &Graph<N, W, C>,
    source: &N,
    sink: &N,
) -> Result<FlowAssignment<N, C>, Error>
where
    N: NodeId,
    W: Weight,
    C: Capacity,
{
    EdmondsKarp.max_flow(graph, source, sink)
}
