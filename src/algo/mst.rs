/*!
# Minimum Spanning Trees

Prim and Kruskal over symmetric weighted graphs. Both return the tree as a
[`WeightedGraph`] with every tree edge stored in both directions, so the result can be
fed back into any other algorithm (or rendered) like an ordinary graph.

The two algorithms deliberately differ on disconnected input:

- [`SpanningTree::prim`] grows from a start node and spans only that node's connected
  component; other components are silently absent from the result.
- [`SpanningTree::kruskal`] spans every component, producing a minimum spanning
  *forest* with one tree per component (isolated nodes are singleton trees).

On connected input both produce trees of equal total weight, even though the edge sets
may differ under weight ties.
*/

use bit_set::BitSet;
use itertools::Itertools;
use log::trace;

use super::*;
use crate::graph::WeightedGraph;

/// Spanning-tree algorithms, available on every weighted graph representation
pub trait SpanningTree<I: NodeId>: WeightedAdjacency + IdLookup<I> + Sized {
    /// Prim's algorithm from `start`: repeatedly adds the cheapest edge crossing the
    /// visited/unvisited boundary. Spans the connected component of `start` only.
    fn prim(&self, start: &I) -> Result<WeightedGraph<I>, GraphError<I>> {
        let s = self.require_node(start)?;

        let mut tree = WeightedGraph::new();
        tree.add_node(start.clone());

        let mut visited = BitSet::with_capacity(self.len());
        let mut queue = MinQueue::new();

        visited.insert(s as usize);
        for (v, w) in self.weighted_neighbors_of(s) {
            queue.push(w, Edge(s, v));
        }

        while let Some((w, Edge(u, v))) =
            queue.pop_current(|_, e: &Edge| !visited.contains(e.1 as usize))
        {
            visited.insert(v as usize);
            tree.add_edge(self.id_of(u).clone(), self.id_of(v).clone(), w);
            trace!("prim: added edge {u}->{v} with weight {w}");

            for (x, wx) in self.weighted_neighbors_of(v) {
                if !visited.contains(x as usize) {
                    queue.push(wx, Edge(v, x));
                }
            }
        }

        Ok(tree)
    }

    /// Kruskal's algorithm: considers all edges in ascending weight order (stable, so
    /// ties fall back to adjacency order) and accepts exactly those connecting two
    /// different components. Spans all components, i.e. yields a minimum spanning
    /// forest on disconnected input.
    fn kruskal(&self) -> WeightedGraph<I> {
        let mut edges = self
            .weighted_arcs()
            .filter(|(e, _)| e.is_normalized() && !e.is_loop())
            .collect_vec();
        edges.sort_by(|(_, a), (_, b)| a.total_cmp(b));

        let mut tree = WeightedGraph::new();
        for id in self.ids() {
            tree.add_node(id.clone());
        }

        let mut dsu = DisjointSetUnion::new(self.number_of_nodes());
        for (Edge(u, v), w) in edges {
            if dsu.union(u, v) {
                tree.add_edge(self.id_of(u).clone(), self.id_of(v).clone(), w);
                trace!("kruskal: added edge {u}->{v} with weight {w}");
            }
        }

        tree
    }
}

impl<I: NodeId, G: WeightedAdjacency + IdLookup<I>> SpanningTree<I> for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn sample() -> WeightedGraph<&'static str> {
        let mut g = WeightedGraph::new();
        g.add_edge("a", "b", 4.0);
        g.add_edge("a", "c", 1.0);
        g.add_edge("b", "c", 3.0);
        g.add_edge("b", "d", 2.0);
        g.add_edge("c", "d", 5.0);
        g
    }

    /// connected + acyclic: exactly `nodes - 1` undirected edges, all reachable
    fn assert_spanning_tree(tree: &WeightedGraph<&'static str>, root: &'static str, nodes: usize) {
        assert_eq!(tree.len(), nodes);
        assert_eq!(tree.number_of_arcs() as usize, 2 * (nodes - 1));
        assert_eq!(tree.bfs(&root).unwrap().len(), nodes);
    }

    #[test]
    fn prim_finds_the_minimum_tree() {
        let tree = sample().prim(&"a").unwrap();
        assert_spanning_tree(&tree, "a", 4);
        assert_eq!(tree.undirected_total_weight(), 6.0);
        // a-c (1), b-d (2), b-c (3)
        assert_eq!(tree.weight_of(&"a", &"c"), Some(1.0));
        assert_eq!(tree.weight_of(&"b", &"d"), Some(2.0));
        assert_eq!(tree.weight_of(&"c", &"b"), Some(3.0));
    }

    #[test]
    fn kruskal_finds_the_same_weight() {
        let tree = sample().kruskal();
        assert_spanning_tree(&tree, "a", 4);
        assert_eq!(tree.undirected_total_weight(), 6.0);
    }

    #[test]
    fn prim_spans_only_the_start_component() {
        let mut g = sample();
        g.add_edge("x", "y", 1.0);

        let tree = g.prim(&"a").unwrap();
        assert_eq!(tree.len(), 4);
        assert!(!tree.contains(&"x"));

        let other = g.prim(&"x").unwrap();
        assert_eq!(other.len(), 2);
        assert_eq!(other.undirected_total_weight(), 1.0);
    }

    #[test]
    fn kruskal_spans_all_components() {
        let mut g = sample();
        g.add_edge("x", "y", 1.0);
        g.add_node("lonely");

        let forest = g.kruskal();
        assert_eq!(forest.len(), 7);
        // 3 edges in the main component, 1 in {x, y}, 0 for the isolated node
        assert_eq!(forest.number_of_arcs(), 8);
        assert_eq!(forest.undirected_total_weight(), 7.0);
        assert!(forest.contains(&"lonely"));
        assert_eq!(forest.degree_of(forest.index_of(&"lonely").unwrap()), 0);
    }

    #[test]
    fn prim_and_kruskal_agree_on_random_connected_graphs() {
        let mut rng = Pcg64Mcg::seed_from_u64(99);

        for n in [8u32, 16, 32] {
            let mut g = WeightedGraph::new();
            // random spanning path guarantees connectivity
            for u in 1..n {
                g.add_edge(u - 1, u, rng.random_range(1.0..20.0));
            }
            for u in 0..n {
                for v in (u + 2)..n {
                    if rng.random_bool(0.3) {
                        g.add_edge(u, v, rng.random_range(1.0..20.0));
                    }
                }
            }

            let prim_weight = g.prim(&0).unwrap().undirected_total_weight();
            let kruskal_weight = g.kruskal().undirected_total_weight();
            assert!(
                (prim_weight - kruskal_weight).abs() < 1e-9,
                "n={n}: prim {prim_weight} vs kruskal {kruskal_weight}"
            );
        }
    }

    #[test]
    fn start_must_exist() {
        assert_eq!(
            sample().prim(&"zz").unwrap_err(),
            GraphError::InvalidEndpoint("zz")
        );
    }
}
