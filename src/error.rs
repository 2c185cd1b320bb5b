use displaydoc::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Error {
    /// Invalid edge capacity, expected a non-negative value
    InvalidCapacity,
    /// Invalid edge weight, expected a finite value
    InvalidWeight,
    /// Node is not present in the graph
    UnknownNode,
    /// Invalid flow endpoints, source and sink must be distinct
    InvalidEndpoints,
    /// Negative-weight cycle reachable from the source
    NegativeCycleDetected,
    /// Arithmetic overflow while summing weights or capacities
    ArithmeticOverflow,
}
