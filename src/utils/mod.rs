/*!
# Utilities

Shared support structures for the graph algorithms:

- [`MinQueue`]: a binary min-heap over `f64` keys with lazy deletion, the frontier
  structure of Dijkstra, A*, and Prim,
- [`DisjointSetUnion`]: union-find with union by rank and path compression, the
  cycle-test structure of Kruskal.
*/

pub mod dsu;
pub mod heap;

pub use dsu::DisjointSetUnion;
pub use heap::MinQueue;
