/*!
# Graph Algorithms

This module provides the classical graph algorithms of the crate, built on top of the
access traits in [`graph`](crate::graph). All algorithms are exposed as traits with
blanket implementations, so they are directly available as methods on the graph values:

```rust
use graphlp::{prelude::*, algo::*};

let g = AdjGraph::from_adjacency([("a", vec!["b", "c"]), ("b", vec!["a"])]);
assert_eq!(g.bfs(&"a").unwrap(), vec!["a", "b", "c"]);
```

Every algorithm is a pure function of its inputs: graph in, result structure out, no
state shared between invocations.
*/

mod coloring;
mod max_flow;
mod mst;
mod shortest_path;
mod traversal;

use crate::{edge::*, error::GraphError, graph::*, node::*, utils::*};

pub use coloring::{Coloring, ColoringResult};
pub use max_flow::{MaxFlow, MaxFlowResult};
pub use mst::SpanningTree;
pub use shortest_path::{ShortestPath, ShortestPaths};
pub use traversal::Traversal;
