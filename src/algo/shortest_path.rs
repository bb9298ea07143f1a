/*!
# Shortest Paths

Three single-source routines over weighted graphs:

- [`ShortestPath::dijkstra`]: non-negative weights (a caller obligation that is *not*
  verified), lazy-deletion min-heap, full distance & predecessor maps.
- [`ShortestPath::bellman_ford`]: tolerates negative weights; `|V| - 1` relaxation
  passes with an early exit, plus one verification pass that turns any remaining
  improvement into [`GraphError::NegativeCycle`].
- [`ShortestPath::astar`]: goal-directed search guided by a caller-supplied heuristic.
  Optimal iff the heuristic never overestimates; admissibility is not checked.

Dijkstra and Bellman-Ford return a [`ShortestPaths`] structure; turning a predecessor
chain into a concrete path is a separate step ([`ShortestPaths::path_to`]) that yields
`None` (not an error) when the target is unreachable.
*/

use fxhash::FxHashMap;
use itertools::Itertools;
use log::trace;

use super::*;

/// Distance and predecessor maps of a single-source shortest-path computation.
///
/// Every node of the graph has a distance entry; unreached nodes carry the sentinel
/// `f64::INFINITY` and no predecessor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPaths<I: NodeId> {
    source: I,
    distances: FxHashMap<I, Weight>,
    predecessors: FxHashMap<I, I>,
}

impl<I: NodeId> ShortestPaths<I> {
    fn from_dense<G: IdLookup<I> + GraphOrder>(
        graph: &G,
        source: I,
        dist: Vec<Weight>,
        pred: Vec<Node>,
    ) -> Self {
        let distances = dist
            .iter()
            .enumerate()
            .map(|(u, &d)| (graph.id_of(u as Node).clone(), d))
            .collect();
        let predecessors = pred
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p != INVALID_NODE)
            .map(|(u, &p)| (graph.id_of(u as Node).clone(), graph.id_of(p).clone()))
            .collect();
        Self {
            source,
            distances,
            predecessors,
        }
    }

    /// Returns the source node the computation started from
    pub fn source(&self) -> &I {
        &self.source
    }

    /// Returns the distance to `id`, `f64::INFINITY` if `id` was not reached (or is not
    /// a node of the underlying graph)
    pub fn distance(&self, id: &I) -> Weight {
        self.distances.get(id).copied().unwrap_or(Weight::INFINITY)
    }

    /// Returns the full node-to-distance mapping
    pub fn distances(&self) -> &FxHashMap<I, Weight> {
        &self.distances
    }

    /// Returns the predecessor of `id` on its shortest path, if any
    pub fn predecessor(&self, id: &I) -> Option<&I> {
        self.predecessors.get(id)
    }

    /// Reconstructs the path from the source to `end` by walking the predecessor chain
    /// backwards. Returns `None` if `end` was never reached (broken chain), i.e. there
    /// is no path.
    pub fn path_to(&self, end: &I) -> Option<Vec<I>> {
        if *end == self.source {
            return Some(vec![self.source.clone()]);
        }

        let mut path = vec![end.clone()];
        let mut cur = end;
        while *cur != self.source {
            cur = self.predecessors.get(cur)?;
            path.push(cur.clone());
        }
        path.reverse();
        Some(path)
    }
}

/// Shortest-path algorithms, available on every weighted graph representation
pub trait ShortestPath<I: NodeId>: WeightedAdjacency + IdLookup<I> + Sized {
    /// Dijkstra's algorithm from `start`. Weights must be non-negative; negative
    /// weights silently produce wrong results (use [`ShortestPath::bellman_ford`]
    /// instead).
    fn dijkstra(&self, start: &I) -> Result<ShortestPaths<I>, GraphError<I>> {
        let s = self.require_node(start)?;
        let n = self.len();

        let mut dist = vec![Weight::INFINITY; n];
        let mut pred = vec![INVALID_NODE; n];
        let mut queue = MinQueue::new();

        dist[s as usize] = 0.0;
        queue.push(0.0, s);

        while let Some((d, u)) = queue.pop_current(|d, &u| d <= dist[u as usize]) {
            for (v, w) in self.weighted_neighbors_of(u) {
                let nd = d + w;
                if nd < dist[v as usize] {
                    dist[v as usize] = nd;
                    pred[v as usize] = u;
                    queue.push(nd, v);
                }
            }
        }

        Ok(ShortestPaths::from_dense(self, start.clone(), dist, pred))
    }

    /// Bellman-Ford from `start`. Handles negative weights; a negative cycle reachable
    /// from `start` is reported as [`GraphError::NegativeCycle`] instead of a distance
    /// map.
    fn bellman_ford(&self, start: &I) -> Result<ShortestPaths<I>, GraphError<I>> {
        let s = self.require_node(start)?;
        let n = self.len();
        let arcs = self.weighted_arcs().collect_vec();

        let mut dist = vec![Weight::INFINITY; n];
        let mut pred = vec![INVALID_NODE; n];
        dist[s as usize] = 0.0;

        for pass in 1..n {
            let mut changed = false;
            for &(Edge(u, v), w) in &arcs {
                let du = dist[u as usize];
                if du + w < dist[v as usize] {
                    dist[v as usize] = du + w;
                    pred[v as usize] = u;
                    changed = true;
                }
            }
            if !changed {
                trace!("bellman-ford converged after {pass} passes");
                break;
            }
        }

        // verification pass: any further improvement proves a negative cycle
        for &(Edge(u, v), w) in &arcs {
            if dist[u as usize] + w < dist[v as usize] {
                return Err(GraphError::NegativeCycle);
            }
        }

        Ok(ShortestPaths::from_dense(self, start.clone(), dist, pred))
    }

    /// A* search from `start` to `goal` guided by `heuristic`. Returns the
    /// reconstructed path, or `Ok(None)` if `goal` is unreachable. The result is only
    /// guaranteed optimal for admissible heuristics (never overestimating the true
    /// remaining cost); this is not verified.
    fn astar<H>(&self, start: &I, goal: &I, heuristic: H) -> Result<Option<Vec<I>>, GraphError<I>>
    where
        H: Fn(&I) -> Weight,
    {
        let s = self.require_node(start)?;
        let t = self.require_node(goal)?;
        let n = self.len();

        let mut g_score = vec![Weight::INFINITY; n];
        let mut pred = vec![INVALID_NODE; n];
        let mut open = MinQueue::new();

        g_score[s as usize] = 0.0;
        open.push(heuristic(start), (s, 0.0));

        while let Some((_, (u, g))) = open.pop_current(|_, &(u, g)| g <= g_score[u as usize]) {
            if u == t {
                let mut path = vec![u];
                let mut cur = u;
                while cur != s {
                    cur = pred[cur as usize];
                    path.push(cur);
                }
                return Ok(Some(
                    path.iter().rev().map(|&v| self.id_of(v).clone()).collect(),
                ));
            }

            for (v, w) in self.weighted_neighbors_of(u) {
                let tentative = g + w;
                if tentative < g_score[v as usize] {
                    g_score[v as usize] = tentative;
                    pred[v as usize] = u;
                    open.push(tentative + heuristic(self.id_of(v)), (v, tentative));
                }
            }
        }

        Ok(None)
    }
}

impl<I: NodeId, G: WeightedAdjacency + IdLookup<I>> ShortestPath<I> for G {}
