/*!
# Graph Errors

Failure conditions of the graph engine. Reachability failures (`NoPath`) are *data*, not
errors: they are represented as `None`/empty results by the individual algorithms. Only
conditions that make a query meaningless end up here.
*/

use std::fmt::Debug;

use thiserror::Error;

/// Errors raised by graph algorithms before or during a computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<I: Debug> {
    /// A start/end/source/sink argument does not name a node of the graph.
    #[error("node {0:?} is not part of the graph")]
    InvalidEndpoint(I),

    /// Bellman-Ford detected a cycle of negative total weight reachable from the start
    /// node; no finite shortest distances exist.
    #[error("graph contains a negative-weight cycle reachable from the start node")]
    NegativeCycle,
}
