/*!
# Disjoint-Set Union

Union-find over dense [`Node`] indices with union by rank and iterative path compression.
Amortized near-constant time per operation, which is more than enough for the edge counts
this crate targets.
*/

use crate::node::{Node, NumNodes};

/// Union-find over the nodes `0..n`
pub struct DisjointSetUnion {
    parent: Vec<Node>,
    rank: Vec<u8>,
    num_sets: NumNodes,
}

impl DisjointSetUnion {
    /// Creates `n` singleton sets
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n as usize],
            num_sets: n,
        }
    }

    /// Returns the representative of the set containing `u`, compressing the path
    /// walked on the way.
    /// ** Panics if `u >= n` **
    pub fn find(&mut self, u: Node) -> Node {
        let mut root = u;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut cur = u;
        while cur != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }

        root
    }

    /// Merges the sets containing `a` and `b`. Returns *true* exactly if they were
    /// distinct sets before the call.
    /// ** Panics if `a >= n || b >= n` **
    pub fn union(&mut self, a: Node, b: Node) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        let (ra, rb) = if self.rank[ra as usize] < self.rank[rb as usize] {
            (rb, ra)
        } else {
            (ra, rb)
        };
        self.parent[rb as usize] = ra;
        if self.rank[ra as usize] == self.rank[rb as usize] {
            self.rank[ra as usize] += 1;
        }
        self.num_sets -= 1;

        true
    }

    /// Returns *true* if `a` and `b` are in the same set
    /// ** Panics if `a >= n || b >= n` **
    pub fn same_set(&mut self, a: Node, b: Node) -> bool {
        self.find(a) == self.find(b)
    }

    /// Returns the current number of disjoint sets
    pub fn number_of_sets(&self) -> NumNodes {
        self.num_sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_find_basics() {
        let mut dsu = DisjointSetUnion::new(5);
        assert_eq!(dsu.number_of_sets(), 5);

        assert!(dsu.union(0, 1));
        assert!(dsu.union(2, 3));
        assert!(!dsu.union(1, 0));
        assert_eq!(dsu.number_of_sets(), 3);

        assert!(dsu.same_set(0, 1));
        assert!(!dsu.same_set(1, 2));

        assert!(dsu.union(1, 3));
        assert!(dsu.same_set(0, 2));
        assert_eq!(dsu.number_of_sets(), 2);
        assert!(!dsu.same_set(0, 4));
    }
}
