//! Single-source shortest paths with the Bellman-Ford algorithm.
//!
//! Negative edge weights are allowed. A negative-weight cycle reachable from the source makes
//! distances meaningless, so it is reported as an error and no table is produced. Cycles the
//! source cannot reach are harmless and go unnoticed.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use itertools::Itertools;

use crate::algo::ShortestPath;
use crate::amount::{Capacity, Weight};
use crate::error::Error;
use crate::graph::Graph;
use crate::node::NodeId;

/// Distance from the source to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Distance<W> {
    Finite(W),
    Unreachable,
}

impl<W> Distance<W> {
    pub fn finite(self) -> Option<W> {
        match self {
            Self::Finite(w) => Some(w),
            Self::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

impl<W: fmt::Display> fmt::Display for Distance<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(w) => write!(f, "{w}"),
            Self::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Distance and path table produced by a single-source shortest path run.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths<N, W> {
    source: N,
    // every node of the graph, in insertion order
    order: Vec<N>,
    distances: BTreeMap<N, W>,
    paths: BTreeMap<N, Vec<N>>,
}

impl<N: NodeId, W: Weight> ShortestPaths<N, W> {
    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn distance(&self, node: &N) -> Distance<W> {
        self.distances
            .get(node)
            .map_or(Distance::Unreachable, |&d| Distance::Finite(d))
    }

    pub fn is_reachable(&self, node: &N) -> bool {
        self.distances.contains_key(node)
    }

    /// Nodes visited from the source to `node`, both included. The source's own path is just
    /// `[source]`. `None` if `node` cannot be reached.
    pub fn path(&self, node: &N) -> Option<&[N]> {
        self.paths.get(node).map(Vec::as_slice)
    }

    /// The edges of the path to `node` as `(from, to)` pairs.
    pub fn path_edges(&self, node: &N) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.path(node).unwrap_or(&[]).iter().tuple_windows()
    }

    /// Distances of the reachable nodes.
    pub fn distances(&self) -> &BTreeMap<N, W> {
        &self.distances
    }

    /// Paths to the reachable nodes.
    pub fn paths(&self) -> &BTreeMap<N, Vec<N>> {
        &self.paths
    }

    /// All nodes of the graph in insertion order, with their distance and path.
    pub fn iter(&self) -> impl Iterator<Item = (&N, Distance<W>, Option<&[N]>)> + '_ {
        self.order
            .iter()
            .map(move |node| (node, self.distance(node), self.path(node)))
    }
}

/// The Bellman-Ford algorithm.
///
/// Edges are relaxed in insertion order and only a strictly shorter candidate replaces a
/// distance, so a node keeps the predecessor of the first edge, in declaration order, that
/// reached its final distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct BellmanFord;

impl<N, W, C> ShortestPath<N, W, C> for BellmanFord
where
    N: NodeId,
    W: Weight,
    C: Capacity,
{
    type Error = Error;

    fn shortest_paths(
        &mut self,
        graph: &Graph<N, W, C>,
        source: &N,
    ) -> Result<ShortestPaths<N, W>, Self::Error> {
        let start = graph.position(source)?;
        let n = graph.node_count();

        let mut distance: Vec<Option<W>> = vec![None; n];
        let mut predecessor: Vec<Option<usize>> = vec![None; n];
        distance[start] = Some(W::zero());

        for pass in 1..n {
            let mut relaxed = false;
            for (tail, head, edge) in graph.arcs() {
                if let Some(candidate) = improvement(&distance, tail, head, edge.weight())? {
                    distance[head] = Some(candidate);
                    predecessor[head] = Some(tail);
                    relaxed = true;
                }
            }

            log::trace!("bellman-ford pass {pass}: relaxed = {relaxed}");
            if !relaxed {
                break;
            }
        }

        // after |V| - 1 passes any further improvement can only come from a negative cycle
        for (tail, head, edge) in graph.arcs() {
            if improvement(&distance, tail, head, edge.weight())?.is_some() {
                log::debug!("negative cycle reachable from {source:?}");
                return Err(Error::NegativeCycleDetected);
            }
        }

        let nodes = graph.nodes();
        let (distances, paths): (BTreeMap<N, W>, BTreeMap<N, Vec<N>>) = distance
            .iter()
            .enumerate()
            .filter_map(|(pos, d)| d.map(|d| (pos, d)))
            .map(|(pos, d)| {
                let path = trace_back(&predecessor, start, pos)
                    .into_iter()
                    .map(|p| nodes[p].clone())
                    .collect::<Vec<_>>();
                ((nodes[pos].clone(), d), (nodes[pos].clone(), path))
            })
            .unzip();

        log::debug!(
            "shortest paths from {source:?}: {} of {n} nodes reachable",
            distance.iter().flatten().count()
        );

        Ok(ShortestPaths {
            source: source.clone(),
            order: nodes.to_vec(),
            distances,
            paths,
        })
    }
}

/// The new distance of `head` if relaxing the edge `tail -> head` shortens it.
fn improvement<W: Weight>(
    distance: &[Option<W>],
    tail: usize,
    head: usize,
    weight: W,
) -> Result<Option<W>, Error> {
    let Some(reached) = distance[tail] else {
        return Ok(None);
    };
    let candidate = reached
        .checked_add(weight)
        .ok_or(Error::ArithmeticOverflow)?;
    Ok(match distance[head] {
        Some(current) if current <= candidate => None,
        _ => Some(candidate),
    })
}

fn trace_back(predecessor: &[Option<usize>], start: usize, target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match predecessor[current] {
            Some(prev) if path.len() <= predecessor.len() => {
                path.push(prev);
                current = prev;
            }
            _ => break,
        }
    }
    debug_assert_eq!(current, start, "predecessor chain does not lead back to the source");

    path.reverse();
    path
}
