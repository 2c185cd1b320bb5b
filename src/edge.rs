use serde::{Deserialize, Serialize};

use crate::amount::{Capacity, Weight};
use crate::error::Error;

/// Position of an edge in its graph's insertion order.
///
/// Parallel edges between the same pair of nodes get distinct ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed edge carrying a cost (`weight`) and a flow bound (`capacity`).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(
    try_from = "RawEdge<N, W, C>",
    bound(deserialize = "N: Deserialize<'de>, \
                    W: Weight + Deserialize<'de>, \
                    C: Capacity + Deserialize<'de>")
)]
pub struct Edge<N, W, C> {
    source: N,
    target: N,
    weight: W,
    capacity: C,
}

impl<N, W, C> Edge<N, W, C>
where
    W: Weight,
    C: Capacity,
{
    pub fn new(source: N, target: N, weight: W, capacity: C) -> Result<Self, Error> {
        if capacity < C::zero() {
            Err(Error::InvalidCapacity)
        } else if !weight.is_finite() {
            Err(Error::InvalidWeight)
        } else {
            Ok(Self {
                source,
                target,
                weight,
                capacity,
            })
        }
    }
}

impl<N, W: Copy, C: Copy> Edge<N, W, C> {
    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn target(&self) -> &N {
        &self.target
    }

    pub fn weight(&self) -> W {
        self.weight
    }

    pub fn capacity(&self) -> C {
        self.capacity
    }
}

/// An unvalidated edge, as read from an edge list.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct RawEdge<N, W, C> {
    pub source: N,
    pub target: N,
    pub weight: W,
    pub capacity: C,
}

impl<N, W, C> TryFrom<RawEdge<N, W, C>> for Edge<N, W, C>
where
    W: Weight,
    C: Capacity,
{
    type Error = Error;

    fn try_from(e: RawEdge<N, W, C>) -> Result<Self, Self::Error> {
        Self::new(e.source, e.target, e.weight, e.capacity)
    }
}

impl<N, W, C> From<Edge<N, W, C>> for RawEdge<N, W, C> {
    fn from(e: Edge<N, W, C>) -> Self {
        Self {
            source: e.source,
            target: e.target,
            weight: e.weight,
            capacity: e.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_capacity() {
        assert_eq!(
            Edge::new("a", "b", 1, -1).unwrap_err(),
            Error::InvalidCapacity
        );
        assert!(Edge::new("a", "b", -7, 0).is_ok());
    }

    #[test]
    fn rejects_non_finite_weight() {
        assert_eq!(
            Edge::new('a', 'b', f64::NAN, 3).unwrap_err(),
            Error::InvalidWeight
        );
        assert_eq!(
            Edge::new('a', 'b', f64::NEG_INFINITY, 3).unwrap_err(),
            Error::InvalidWeight
        );
        assert!(Edge::new('a', 'b', -0.5, 3).is_ok());
    }

    #[test]
    fn raw_edge_is_validated() {
        let raw = RawEdge {
            source: 1,
            target: 2,
            weight: 3,
            capacity: -4,
        };
        assert_eq!(
            Edge::<i32, i32, i32>::try_from(raw),
            Err(Error::InvalidCapacity)
        );
    }
}
