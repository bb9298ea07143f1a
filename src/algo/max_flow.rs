/*!
# Maximum Flow

Ford-Fulkerson with breadth-first augmenting-path search, i.e. Edmonds-Karp, which
bounds the number of augmentations polynomially instead of by the (possibly huge) flow
value.

The input is a directed capacity graph. A working residual structure is built up front:
every arc keeps its capacity, and a zero-capacity reverse arc is added wherever none
exists. Each round, a BFS over arcs with positive residual capacity records
predecessors; if the sink is reached, the bottleneck (minimum residual along the path)
is pushed: subtracted forward, added backward, and accumulated into the total flow.
The algorithm terminates when the sink becomes unreachable.

The result reports the total flow value and a per-arc flow assignment derived as
`original capacity - final residual capacity`.
*/

use std::collections::VecDeque;

use fxhash::FxHashMap;
use log::debug;

use super::*;
use crate::DEFAULT_TOLERANCE;

/// Total value and per-arc assignment of a maximum flow
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaxFlowResult<I: NodeId> {
    value: Weight,
    flows: Vec<(I, I, Weight)>,
}

impl<I: NodeId> MaxFlowResult<I> {
    /// Returns the value of the maximum flow
    pub fn value(&self) -> Weight {
        self.value
    }

    /// Returns the flow pushed over the arc `from -> to` (`0` for unknown arcs)
    pub fn flow(&self, from: &I, to: &I) -> Weight {
        self.flows
            .iter()
            .find(|(u, v, _)| u == from && v == to)
            .map_or(0.0, |&(_, _, f)| f)
    }

    /// Returns all arcs with their assigned flow, in capacity-graph arc order
    pub fn flows(&self) -> &[(I, I, Weight)] {
        &self.flows
    }
}

/// Maximum-flow computation, available on every weighted graph representation
pub trait MaxFlow<I: NodeId>: WeightedAdjacency + IdLookup<I> + Sized {
    /// Computes the maximum flow from `source` to `sink`, treating arc weights as
    /// capacities. Fails with [`GraphError::InvalidEndpoint`] before any computation if
    /// either endpoint is missing.
    fn max_flow(&self, source: &I, sink: &I) -> Result<MaxFlowResult<I>, GraphError<I>> {
        let s = self.require_node(source)?;
        let t = self.require_node(sink)?;
        let n = self.len();

        if s == t {
            // source == sink: the empty flow
            let flows = self
                .weighted_arcs()
                .map(|(Edge(u, v), _)| (self.id_of(u).clone(), self.id_of(v).clone(), 0.0))
                .collect();
            return Ok(MaxFlowResult { value: 0.0, flows });
        }

        // residual capacities; reverse arcs start at zero
        let mut residual: Vec<FxHashMap<Node, Weight>> = vec![FxHashMap::default(); n];
        for (Edge(u, v), w) in self.weighted_arcs() {
            *residual[u as usize].entry(v).or_insert(0.0) += w;
        }
        for u in self.vertices() {
            let targets: Vec<Node> = residual[u as usize].keys().copied().collect();
            for v in targets {
                residual[v as usize].entry(u).or_insert(0.0);
            }
        }

        let mut value = 0.0;
        let mut pred = vec![INVALID_NODE; n];

        loop {
            // BFS over arcs with positive residual capacity
            pred.fill(INVALID_NODE);
            pred[s as usize] = s;
            let mut queue = VecDeque::from([s]);

            'search: while let Some(u) = queue.pop_front() {
                for (&v, &cap) in &residual[u as usize] {
                    if cap > DEFAULT_TOLERANCE && pred[v as usize] == INVALID_NODE {
                        pred[v as usize] = u;
                        if v == t {
                            break 'search;
                        }
                        queue.push_back(v);
                    }
                }
            }

            if pred[t as usize] == INVALID_NODE {
                break;
            }

            // bottleneck along the recorded path
            let mut bottleneck = Weight::INFINITY;
            let mut v = t;
            while v != s {
                let u = pred[v as usize];
                bottleneck = bottleneck.min(residual[u as usize][&v]);
                v = u;
            }

            // augment: subtract forward, add backward
            let mut v = t;
            while v != s {
                let u = pred[v as usize];
                *residual[u as usize].get_mut(&v).unwrap() -= bottleneck;
                *residual[v as usize].get_mut(&u).unwrap() += bottleneck;
                v = u;
            }

            debug!("max-flow: augmented by {bottleneck}");
            value += bottleneck;
        }

        // flow per original arc = capacity - remaining residual
        let flows = self
            .weighted_arcs()
            .map(|(Edge(u, v), cap)| {
                let flow = (cap - residual[u as usize][&v]).max(0.0);
                (self.id_of(u).clone(), self.id_of(v).clone(), flow)
            })
            .collect();

        Ok(MaxFlowResult { value, flows })
    }
}

impl<I: NodeId, G: WeightedAdjacency + IdLookup<I>> MaxFlow<I> for G {}
