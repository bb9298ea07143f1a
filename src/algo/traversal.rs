/*!
# Graph Traversal

Breadth-first and depth-first search over the unweighted view of a graph. Both return
the visited nodes in discovery order: each node reachable from the start appears exactly
once, unreachable nodes not at all. Neighbor order is the adjacency insertion order, so
results are fully deterministic for a given construction sequence.

DFS is implemented with an explicit stack rather than recursion, so arbitrarily deep
graphs cannot overflow the call stack; the neighbor lists are pushed in reverse to
reproduce exactly the pre-order a recursive formulation would yield.
*/

use std::collections::VecDeque;

use bit_set::BitSet;

use super::*;

/// Traversal algorithms, available on every graph representation
pub trait Traversal<I: NodeId>: Adjacency + IdLookup<I> + Sized {
    /// Breadth-first search from `start`. Returns the reachable nodes in discovery
    /// order, or [`GraphError::InvalidEndpoint`] if `start` is not part of the graph.
    fn bfs(&self, start: &I) -> Result<Vec<I>, GraphError<I>> {
        let s = self.require_node(start)?;

        let mut visited = BitSet::with_capacity(self.len());
        let mut queue = VecDeque::new();
        let mut order = Vec::new();

        visited.insert(s as usize);
        queue.push_back(s);

        while let Some(u) = queue.pop_front() {
            order.push(self.id_of(u).clone());
            for v in self.neighbors_of(u) {
                if visited.insert(v as usize) {
                    queue.push_back(v);
                }
            }
        }

        Ok(order)
    }

    /// Depth-first search from `start`, yielding the recursive pre-order. Returns
    /// [`GraphError::InvalidEndpoint`] if `start` is not part of the graph.
    fn dfs(&self, start: &I) -> Result<Vec<I>, GraphError<I>> {
        let s = self.require_node(start)?;

        let mut visited = BitSet::with_capacity(self.len());
        let mut stack = vec![s];
        let mut order = Vec::new();

        while let Some(u) = stack.pop() {
            if !visited.insert(u as usize) {
                continue;
            }
            order.push(self.id_of(u).clone());

            // reversed so that the first neighbor is popped (and thus visited) first
            let frame_start = stack.len();
            for v in self.neighbors_of(u) {
                if !visited.contains(v as usize) {
                    stack.push(v);
                }
            }
            stack[frame_start..].reverse();
        }

        Ok(order)
    }
}

impl<I: NodeId, G: Adjacency + IdLookup<I>> Traversal<I> for G {}
