/*!
# Node Representation

Algorithms address nodes as dense indices `0..n`. We choose `Node = u32` as almost all
use-cases involve less than `2^32` nodes. This allows us to (1) save space as compared to
`u64/usize` and (2) index `Vec`-based algorithm state directly without hashing.

Caller-facing node *identifiers* are arbitrary hashable values (strings, integers, ...)
implementing [`NodeId`]; the graph representations in [`graph`](crate::graph) translate
between identifiers and indices at the API boundary.
*/

use std::fmt::Debug;
use std::hash::Hash;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// Caller-facing node identifier.
///
/// Automatically implemented for every type that is hashable, comparable, cloneable, and
/// debug-printable, e.g. `String`, `&str`, or integers. Graphs assign each distinct
/// identifier a dense [`Node`] index in first-seen order.
pub trait NodeId: Hash + Eq + Clone + Debug {}

impl<T: Hash + Eq + Clone + Debug> NodeId for T {}
