/*!
`graphlp` is the algorithmic engine behind an educational graph/optimization visualizer:
a library of classical graph algorithms and simplex-family linear-programming solvers.

# Subsystems

Two independent engines that share nothing but data-model conventions:

- **Graph engine** ([`algo`]): traversal (BFS/DFS), coloring (greedy, Welsh-Powell),
  shortest paths (Dijkstra, Bellman-Ford, A*), minimum spanning trees (Prim, Kruskal),
  and maximum flow (Edmonds-Karp).
- **LP engine** ([`lp`]): the simplex tableau method for standard-form problems, the
  two-phase method for general constraint mixes, and the revised (matrix-form) method.

Every algorithm is a pure function of its inputs: graph or problem in, result structure
out. Calls share no state, so independent solves may run concurrently without any
coordination.

# Representation

Graphs ([`AdjGraph`](graph::AdjGraph), [`WeightedGraph`](graph::WeightedGraph)) are
keyed by arbitrary hashable identifiers but store dense `u32`-indexed adjacency lists
internally; see [`node`] and [`graph`]. Identifiers mentioned anywhere are registered
as nodes on insertion, so algorithms never trip over a dangling neighbor reference.

# Usage

Algorithms are traits implemented on the graph values themselves:

```rust
use graphlp::{prelude::*, algo::*};

let mut g = WeightedGraph::new();
g.add_edge("a", "b", 1.0);
g.add_edge("b", "c", 2.0);

let sp = g.dijkstra(&"a").unwrap();
assert_eq!(sp.distance(&"c"), 3.0);
assert_eq!(sp.path_to(&"c").unwrap(), vec!["a", "b", "c"]);
```

The LP engine is driven through a configured solver value:

```rust
use graphlp::lp::{Direction, LpProblem, SimplexSolver, SolveStatus};

let problem = LpProblem::with_le_rows(
    Direction::Maximize,
    vec![3.0, 2.0],
    vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![-1.0, 2.0]],
    vec![4.0, 5.0, 2.0],
)
.unwrap();

let solution = SimplexSolver::new().solve_standard(&problem).unwrap();
assert_eq!(solution.status, SolveStatus::Optimal);
```

# Error model

Malformed queries fail fast with structured errors ([`error::GraphError`],
[`lp::LpError`]); conditions discovered mid-solve (infeasibility, unboundedness,
iteration caps) are statuses on the result, and plain unreachability is `None` data.
The crate never panics on caller input and installs no logger; it emits sparse
`log` records at debug/trace level.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod graph;
pub mod lp;
pub mod node;
pub mod utils;

/// Absolute tolerance used for floating-point comparisons wherever a caller does not
/// configure one explicitly (residual capacities in max-flow, the default of
/// [`lp::SimplexSolver`]).
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// `graphlp::prelude` includes the node/edge definitions, both graph representations
/// with their access traits, and the graph error type.
pub mod prelude {
    pub use super::{edge::*, error::*, graph::*, node::*};
}
