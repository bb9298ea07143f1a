/*!
# Graph Representations

Two insertion-ordered adjacency representations keyed by arbitrary identifiers:

- [`AdjGraph`]: unweighted adjacency lists, the input for traversal and coloring,
- [`WeightedGraph`]: weighted adjacency lists, the input for shortest paths, spanning
  trees, and flows.

Both map caller-facing identifiers (see [`NodeId`]) to dense [`Node`] indices in
first-seen order, so algorithm state lives in plain `Vec`s. Every identifier mentioned
anywhere (including as the far end of an arc) is registered as a node on insertion.
A lookup inside an algorithm can therefore never miss; identifiers that only ever appear
as neighbors simply become nodes without outgoing arcs.

Directedness is by convention: an arc is a single directed entry, an *edge* is stored as
two arcs of equal weight (which is what [`AdjGraph::add_edge`] and
[`WeightedGraph::add_edge`] do). Algorithms that assume symmetry (coloring, MST) expect
the caller to have used edges, not arcs.

The access traits ([`GraphOrder`], [`Adjacency`], [`WeightedAdjacency`], [`IdLookup`])
decouple the algorithms in [`algo`](crate::algo) from the concrete representation.
*/

use fxhash::FxHashMap;

use crate::{edge::*, error::GraphError, node::*};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Returns the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns *true* if the graph has no nodes (and thus no arcs)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over V as dense indices
    fn vertices(&self) -> std::ops::Range<Node> {
        0..self.number_of_nodes()
    }
}

/// Getters for neighborhoods & arcs of an unweighted view onto a graph
pub trait Adjacency: GraphOrder {
    /// Returns an iterator over the (outgoing) neighborhood of a given vertex, in
    /// insertion order.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over all arcs in the graph, grouped by source vertex
    fn arcs(&self) -> impl Iterator<Item = Edge> + '_
    where
        Self: Sized,
    {
        self.vertices()
            .flat_map(move |u| self.neighbors_of(u).map(move |v| Edge(u, v)))
    }
}

/// Getters for weighted neighborhoods & arcs
pub trait WeightedAdjacency: Adjacency {
    /// Returns an iterator over `(neighbor, weight)` pairs of a given vertex, in
    /// insertion order.
    /// ** Panics if `u >= n` **
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_;

    /// Returns an iterator over all arcs with their weights, grouped by source vertex
    fn weighted_arcs(&self) -> impl Iterator<Item = (Edge, Weight)> + '_
    where
        Self: Sized,
    {
        self.vertices().flat_map(move |u| {
            self.weighted_neighbors_of(u)
                .map(move |(v, w)| (Edge(u, v), w))
        })
    }
}

/// Translation between caller-facing identifiers and dense [`Node`] indices
pub trait IdLookup<I: NodeId> {
    /// Returns the dense index of `id`, if it is part of the graph
    fn index_of(&self, id: &I) -> Option<Node>;

    /// Returns the identifier of a dense index.
    /// ** Panics if `u >= n` **
    fn id_of(&self, u: Node) -> &I;

    /// Returns an iterator over all identifiers in insertion order
    fn ids(&self) -> std::slice::Iter<'_, I>;

    /// Returns *true* if `id` is part of the graph
    fn contains(&self, id: &I) -> bool {
        self.index_of(id).is_some()
    }

    /// Resolves `id` or fails with [`GraphError::InvalidEndpoint`]
    fn require_node(&self, id: &I) -> Result<Node, GraphError<I>> {
        self.index_of(id)
            .ok_or_else(|| GraphError::InvalidEndpoint(id.clone()))
    }
}

macro_rules! impl_id_graph_ops {
    ($graph:ident) => {
        impl<I: NodeId> GraphOrder for $graph<I> {
            fn number_of_nodes(&self) -> NumNodes {
                self.adj.len() as NumNodes
            }
        }

        impl<I: NodeId> IdLookup<I> for $graph<I> {
            fn index_of(&self, id: &I) -> Option<Node> {
                self.index.get(id).copied()
            }

            fn id_of(&self, u: Node) -> &I {
                &self.ids[u as usize]
            }

            fn ids(&self) -> std::slice::Iter<'_, I> {
                self.ids.iter()
            }
        }

        impl<I: NodeId> Default for $graph<I> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<I: NodeId> $graph<I> {
            /// Creates an empty graph
            pub fn new() -> Self {
                Self {
                    ids: Vec::new(),
                    index: FxHashMap::default(),
                    adj: Vec::new(),
                    num_arcs: 0,
                }
            }

            /// Registers `id` as a node and returns its dense index. Idempotent: an
            /// already known identifier keeps its index.
            pub fn add_node(&mut self, id: I) -> Node {
                if let Some(&u) = self.index.get(&id) {
                    return u;
                }
                let u = self.adj.len() as Node;
                self.index.insert(id.clone(), u);
                self.ids.push(id);
                self.adj.push(Vec::new());
                u
            }

            /// Returns the number of directed arc entries
            pub fn number_of_arcs(&self) -> NumEdges {
                self.num_arcs
            }
        }
    };
}

/// An unweighted graph stored as insertion-ordered adjacency lists
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjGraph<I: NodeId> {
    ids: Vec<I>,
    index: FxHashMap<I, Node>,
    adj: Vec<Vec<Node>>,
    num_arcs: NumEdges,
}

impl_id_graph_ops!(AdjGraph);

impl<I: NodeId> AdjGraph<I> {
    /// Adds the directed arc `from -> to`, registering unknown endpoints as nodes
    pub fn add_arc(&mut self, from: I, to: I) {
        let u = self.add_node(from);
        let v = self.add_node(to);
        self.adj[u as usize].push(v);
        self.num_arcs += 1;
    }

    /// Adds the undirected edge `{a, b}` as two directed arcs (a single arc for loops)
    pub fn add_edge(&mut self, a: I, b: I) {
        let u = self.add_node(a);
        let v = self.add_node(b);
        self.adj[u as usize].push(v);
        self.num_arcs += 1;
        if u != v {
            self.adj[v as usize].push(u);
            self.num_arcs += 1;
        }
    }

    /// Builds a graph from a dictionary-like sequence of `(node, neighbors)` entries,
    /// preserving entry and neighbor order. This mirrors the adjacency-map input shape
    /// handed over by UI layers.
    pub fn from_adjacency<N>(entries: impl IntoIterator<Item = (I, N)>) -> Self
    where
        N: IntoIterator<Item = I>,
    {
        let mut graph = Self::new();
        for (id, neighbors) in entries {
            let u = graph.add_node(id);
            for nb in neighbors {
                let v = graph.add_node(nb);
                graph.adj[u as usize].push(v);
                graph.num_arcs += 1;
            }
        }
        graph
    }
}

impl<I: NodeId> Adjacency for AdjGraph<I> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.adj[u as usize].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.adj[u as usize].len() as NumNodes
    }
}

/// A weighted graph stored as insertion-ordered adjacency lists
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedGraph<I: NodeId> {
    ids: Vec<I>,
    index: FxHashMap<I, Node>,
    adj: Vec<Vec<(Node, Weight)>>,
    num_arcs: NumEdges,
}

impl_id_graph_ops!(WeightedGraph);

impl<I: NodeId> WeightedGraph<I> {
    /// Adds the directed arc `from -> to` with the given weight, registering unknown
    /// endpoints as nodes
    pub fn add_arc(&mut self, from: I, to: I, weight: Weight) {
        let u = self.add_node(from);
        let v = self.add_node(to);
        self.adj[u as usize].push((v, weight));
        self.num_arcs += 1;
    }

    /// Adds the undirected edge `{a, b}` as two directed arcs of equal weight
    /// (a single arc for loops)
    pub fn add_edge(&mut self, a: I, b: I, weight: Weight) {
        let u = self.add_node(a);
        let v = self.add_node(b);
        self.adj[u as usize].push((v, weight));
        self.num_arcs += 1;
        if u != v {
            self.adj[v as usize].push((u, weight));
            self.num_arcs += 1;
        }
    }

    /// Builds a graph from a dictionary-like sequence of `(node, [(neighbor, weight)])`
    /// entries, preserving entry and neighbor order
    pub fn from_adjacency<N>(entries: impl IntoIterator<Item = (I, N)>) -> Self
    where
        N: IntoIterator<Item = (I, Weight)>,
    {
        let mut graph = Self::new();
        for (id, neighbors) in entries {
            let u = graph.add_node(id);
            for (nb, w) in neighbors {
                let v = graph.add_node(nb);
                graph.adj[u as usize].push((v, w));
                graph.num_arcs += 1;
            }
        }
        graph
    }

    /// Returns the weight of the first stored arc `u -> v`, by dense indices
    pub(crate) fn arc_weight(&self, u: Node, v: Node) -> Option<Weight> {
        self.adj[u as usize]
            .iter()
            .find(|&&(x, _)| x == v)
            .map(|&(_, w)| w)
    }

    /// Returns the weight of the first stored arc `from -> to`, or `None` if either
    /// endpoint or the arc itself is missing
    pub fn weight_of(&self, from: &I, to: &I) -> Option<Weight> {
        let u = self.index_of(from)?;
        let v = self.index_of(to)?;
        self.arc_weight(u, v)
    }

    /// Sums the arc weights along a node sequence. Returns `None` if any hop is not an
    /// arc of the graph; an empty or single-node sequence has weight `0`.
    pub fn path_weight(&self, path: &[I]) -> Option<Weight> {
        path.windows(2)
            .map(|hop| self.weight_of(&hop[0], &hop[1]))
            .sum()
    }

    /// Half the sum of all arc weights. For symmetric graphs (every edge stored as two
    /// arcs, e.g. spanning trees) this is the total weight of the undirected edge set.
    pub fn undirected_total_weight(&self) -> Weight {
        self.weighted_arcs().map(|(_, w)| w).sum::<Weight>() / 2.0
    }
}

impl<I: NodeId> Adjacency for WeightedGraph<I> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.adj[u as usize].iter().map(|&(v, _)| v)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.adj[u as usize].len() as NumNodes
    }
}

impl<I: NodeId> WeightedAdjacency for WeightedGraph<I> {
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.adj[u as usize].iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn insertion_order_and_indices() {
        let mut g = AdjGraph::new();
        g.add_arc("b", "a");
        g.add_arc("a", "c");
        g.add_arc("b", "c");

        // first-seen order: b, a, c
        assert_eq!(g.ids().copied().collect_vec(), vec!["b", "a", "c"]);
        assert_eq!(g.index_of(&"b"), Some(0));
        assert_eq!(g.index_of(&"a"), Some(1));
        assert_eq!(g.index_of(&"c"), Some(2));
        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(g.number_of_arcs(), 3);
    }

    #[test]
    fn neighbors_preserve_order() {
        let g = AdjGraph::from_adjacency([("a", vec!["c", "b", "d"]), ("b", vec!["a"])]);
        let a = g.index_of(&"a").unwrap();
        let nbs = g.neighbors_of(a).map(|v| *g.id_of(v)).collect_vec();
        assert_eq!(nbs, vec!["c", "b", "d"]);
        // "c" and "d" were registered as neighbor-only nodes
        assert_eq!(g.number_of_nodes(), 4);
        assert_eq!(g.degree_of(g.index_of(&"d").unwrap()), 0);
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut g = AdjGraph::new();
        let u = g.add_node("x");
        assert_eq!(g.add_node("x"), u);
        assert_eq!(g.number_of_nodes(), 1);
    }

    #[test]
    fn undirected_edges_are_two_arcs() {
        let mut g = WeightedGraph::new();
        g.add_edge("a", "b", 2.5);
        assert_eq!(g.number_of_arcs(), 2);
        assert_eq!(g.weight_of(&"a", &"b"), Some(2.5));
        assert_eq!(g.weight_of(&"b", &"a"), Some(2.5));
        assert_eq!(g.undirected_total_weight(), 2.5);

        g.add_edge("a", "a", 1.0);
        assert_eq!(g.number_of_arcs(), 3);
    }

    #[test]
    fn path_weight_sums_hops() {
        let g = WeightedGraph::from_adjacency([
            ("a", vec![("b", 1.0)]),
            ("b", vec![("c", 2.0)]),
        ]);
        assert_eq!(g.path_weight(&["a", "b", "c"]), Some(3.0));
        assert_eq!(g.path_weight(&["a"]), Some(0.0));
        assert_eq!(g.path_weight(&["a", "c"]), None);
    }

    #[test]
    fn require_node_rejects_unknown_ids() {
        let g = AdjGraph::from_adjacency([("a", vec!["b"])]);
        assert!(g.require_node(&"a").is_ok());
        assert_eq!(
            g.require_node(&"z"),
            Err(GraphError::InvalidEndpoint("z"))
        );
    }
}
