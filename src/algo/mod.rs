use core::fmt::Debug;

use crate::graph::Graph;

pub mod max_flow;
pub mod shortest_path;

use max_flow::FlowAssignment;
use shortest_path::ShortestPaths;

/// A single-source shortest path algorithm.
pub trait ShortestPath<N, W, C> {
    type Error: Debug;

    /// Compute the distance and one shortest path from `source` to every node of `graph`.
    fn shortest_paths(
        &mut self,
        graph: &Graph<N, W, C>,
        source: &N,
    ) -> Result<ShortestPaths<N, W>, Self::Error>;
}

/// A maximum flow algorithm.
pub trait MaxFlow<N, W, C> {
    type Error: Debug;

    /// Run the algorithm over the specified graph and return the maximum flow value from
    /// `source` to `sink` along with the flow carried by each edge. Edge weights are ignored.
    fn max_flow(
        &mut self,
        graph: &Graph<N, W, C>,
        source: &N,
        sink: &N,
    ) -> Result<FlowAssignment<N, C>, Self::Error>;
}
