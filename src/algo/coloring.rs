/*!
# Graph Coloring

Two heuristics that assign every node a positive color class such that no edge connects
two nodes of the same color:

- [`Coloring::greedy_coloring`]: nodes in insertion order, each takes the smallest color
  not used by an already-colored neighbor. Deterministic but order-dependent.
- [`Coloring::welsh_powell`]: nodes in descending-degree order (stable, so insertion
  order breaks ties); each round opens a new color on the first uncolored node and hands
  the same color to every later uncolored node not adjacent to a node of that color.

Both are heuristics: they bound the chromatic number from above but do not compute it.
Welsh-Powell needs at most `max_degree + 1` colors and typically uses no more than the
greedy sweep. Both expect a symmetric graph (every edge stored in both directions).
*/

use fxhash::FxHashMap;

use super::*;

/// A proper node coloring with colors `1..=number_of_colors`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColoringResult<I: NodeId> {
    colors: FxHashMap<I, u32>,
    num_colors: u32,
}

impl<I: NodeId> ColoringResult<I> {
    fn from_dense<G: IdLookup<I> + GraphOrder>(graph: &G, colors: Vec<u32>) -> Self {
        let num_colors = colors.iter().copied().max().unwrap_or(0);
        let colors = colors
            .into_iter()
            .enumerate()
            .map(|(u, c)| (graph.id_of(u as Node).clone(), c))
            .collect();
        Self { colors, num_colors }
    }

    /// Returns the color class of `id`, if the node exists
    pub fn color_of(&self, id: &I) -> Option<u32> {
        self.colors.get(id).copied()
    }

    /// Returns the number of distinct color classes used
    pub fn number_of_colors(&self) -> u32 {
        self.num_colors
    }

    /// Returns the full node-to-color mapping
    pub fn as_map(&self) -> &FxHashMap<I, u32> {
        &self.colors
    }
}

/// Coloring heuristics, available on every graph representation
pub trait Coloring<I: NodeId>: Adjacency + IdLookup<I> + Sized {
    /// Greedy sweep in node insertion order: every node receives the smallest positive
    /// color absent among its already-colored neighbors.
    fn greedy_coloring(&self) -> ColoringResult<I> {
        let n = self.len();
        let mut colors = vec![0u32; n];
        // colors used by neighbors of the current node; index 0 is unused
        let mut taken = vec![false; n + 2];

        for u in self.vertices() {
            for v in self.neighbors_of(u) {
                let c = colors[v as usize];
                if c != 0 {
                    taken[c as usize] = true;
                }
            }

            let mut color = 1u32;
            while taken[color as usize] {
                color += 1;
            }
            colors[u as usize] = color;

            for v in self.neighbors_of(u) {
                taken[colors[v as usize] as usize] = false;
            }
        }

        ColoringResult::from_dense(self, colors)
    }

    /// Welsh-Powell: sort nodes by descending degree (stable), then repeatedly open a
    /// new color on the first uncolored node and extend it to every later uncolored
    /// node with no neighbor of that color.
    fn welsh_powell(&self) -> ColoringResult<I> {
        let mut order: Vec<Node> = self.vertices().collect();
        order.sort_by_key(|&u| std::cmp::Reverse(self.degree_of(u)));

        let mut colors = vec![0u32; self.len()];
        let mut color = 0u32;

        for i in 0..order.len() {
            if colors[order[i] as usize] != 0 {
                continue;
            }
            color += 1;
            colors[order[i] as usize] = color;

            for &v in &order[i + 1..] {
                if colors[v as usize] == 0
                    && self.neighbors_of(v).all(|w| colors[w as usize] != color)
                {
                    colors[v as usize] = color;
                }
            }
        }

        ColoringResult::from_dense(self, colors)
    }
}

impl<I: NodeId, G: Adjacency + IdLookup<I>> Coloring<I> for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjGraph;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn assert_proper<I: NodeId, G: Adjacency + IdLookup<I>>(graph: &G, coloring: &ColoringResult<I>) {
        for u in graph.vertices() {
            let cu = coloring.color_of(graph.id_of(u)).unwrap();
            assert!(cu >= 1);
            for v in graph.neighbors_of(u) {
                if u != v {
                    assert_ne!(cu, coloring.color_of(graph.id_of(v)).unwrap());
                }
            }
        }
    }

    fn odd_cycle() -> AdjGraph<u32> {
        let mut g = AdjGraph::new();
        for i in 0..5u32 {
            g.add_edge(i, (i + 1) % 5);
        }
        g
    }

    #[test]
    fn greedy_on_a_triangle_uses_three_colors() {
        let mut g = AdjGraph::new();
        g.add_edge("a", "b");
        g.add_edge("b", "c");
        g.add_edge("c", "a");

        let coloring = g.greedy_coloring();
        assert_proper(&g, &coloring);
        assert_eq!(coloring.number_of_colors(), 3);
    }

    #[test]
    fn greedy_is_insertion_order_dependent() {
        // star with center first: center gets 1, leaves get 2
        let mut g = AdjGraph::new();
        for leaf in ["b", "c", "d"] {
            g.add_edge("a", leaf);
        }
        let coloring = g.greedy_coloring();
        assert_proper(&g, &coloring);
        assert_eq!(coloring.number_of_colors(), 2);
        assert_eq!(coloring.color_of(&"a"), Some(1));
    }

    #[test]
    fn welsh_powell_colors_odd_cycle() {
        let g = odd_cycle();
        let coloring = g.welsh_powell();
        assert_proper(&g, &coloring);
        // an odd cycle needs exactly three colors
        assert_eq!(coloring.number_of_colors(), 3);
    }

    #[test]
    fn welsh_powell_prefers_high_degree_nodes() {
        // bipartite double star: the two centers share the first color round
        let mut g = AdjGraph::new();
        g.add_edge("u", "v");
        for leaf in ["a", "b", "c"] {
            g.add_edge("u", leaf);
        }
        for leaf in ["x", "y", "z"] {
            g.add_edge("v", leaf);
        }

        let coloring = g.welsh_powell();
        assert_proper(&g, &coloring);
        assert_eq!(coloring.number_of_colors(), 2);
    }

    #[test]
    fn both_heuristics_are_proper_on_random_graphs() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);

        for n in [10u32, 25, 50] {
            let mut g = AdjGraph::new();
            for u in 0..n {
                g.add_node(u);
            }
            for u in 0..n {
                for v in (u + 1)..n {
                    if rng.random_bool(0.2) {
                        g.add_edge(u, v);
                    }
                }
            }

            assert_proper(&g, &g.greedy_coloring());
            assert_proper(&g, &g.welsh_powell());
        }
    }

    #[test]
    fn isolated_nodes_share_one_color() {
        let mut g = AdjGraph::new();
        for id in ["a", "b", "c"] {
            g.add_node(id);
        }
        let coloring = g.welsh_powell();
        assert_eq!(coloring.number_of_colors(), 1);
        assert_eq!(coloring.color_of(&"b"), Some(1));
    }
}
