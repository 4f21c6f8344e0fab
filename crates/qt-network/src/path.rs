//! Cost-parameterised Dijkstra over a [`WaterNetwork`].
//!
//! Callers supply the edge cost as a closure `(pipe, entered_node) ->
//! Option<f64>`.  Returning `None` makes the pipe untraversable, which is
//! how feasibility constraints (e.g. minimum pressure) prune the graph.
//! Costs must be non-negative.
//!
//! Heap entries are keyed `(cost, NodeId)` so equal-cost frontiers settle in
//! ascending id order and results are reproducible run to run.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use qt_core::{NodeId, PipeId};

use crate::network::{Pipe, WaterNetwork};

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered walk through the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Visited nodes, origin first.  Always non-empty.
    pub nodes: Vec<NodeId>,
    /// Pipes traversed; `pipes.len() == nodes.len() - 1`.
    pub pipes: Vec<PipeId>,
    /// Sum of edge costs.
    pub cost:  f64,
}

impl Path {
    /// `true` if origin and destination coincide.
    pub fn is_trivial(&self) -> bool {
        self.pipes.is_empty()
    }
}

// ── ShortestPathTree ──────────────────────────────────────────────────────────

/// Single-source shortest-path result.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    origin:    NodeId,
    dist:      Vec<f64>,
    prev_pipe: Vec<PipeId>,
    prev_node: Vec<NodeId>,
}

impl ShortestPathTree {
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// Best cost from the origin, or `None` if `node` was not reached.
    pub fn distance(&self, node: NodeId) -> Option<f64> {
        self.dist
            .get(node.index())
            .copied()
            .filter(|d| d.is_finite())
    }

    /// Reconstruct the path from the origin to `node`.
    pub fn path_to(&self, node: NodeId) -> Option<Path> {
        let cost = self.distance(node)?;
        let mut nodes = vec![node];
        let mut pipes = Vec::new();
        let mut cur = node;
        while cur != self.origin {
            pipes.push(self.prev_pipe[cur.index()]);
            cur = self.prev_node[cur.index()];
            nodes.push(cur);
        }
        nodes.reverse();
        pipes.reverse();
        Some(Path { nodes, pipes, cost })
    }

    /// Reached nodes (origin included) with their distances, in id order.
    pub fn reached(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.dist
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
            .map(|(i, &d)| (NodeId(i as u32), d))
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Shortest paths from `origin` to every node within `limit` cost.
///
/// Nodes whose best cost would exceed `limit` are left unreached.
pub fn shortest_path_tree<F>(
    network: &WaterNetwork,
    origin:  NodeId,
    limit:   Option<f64>,
    mut cost: F,
) -> ShortestPathTree
where
    F: FnMut(&Pipe, NodeId) -> Option<f64>,
{
    let n = network.node_count();
    let limit = limit.unwrap_or(f64::INFINITY);
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_pipe = vec![PipeId::INVALID; n];
    let mut prev_node = vec![NodeId::INVALID; n];

    if origin.index() >= n {
        return ShortestPathTree { origin, dist, prev_pipe, prev_node };
    }
    dist[origin.index()] = 0.0;

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), origin)));

    while let Some(Reverse((OrderedFloat(d), node))) = heap.pop() {
        // Skip stale heap entries.
        if d > dist[node.index()] {
            continue;
        }

        for (pid, pipe, next) in network.neighbors(node) {
            let Some(step) = cost(pipe, next) else { continue };
            debug_assert!(step >= 0.0, "negative edge cost on pipe {}", pipe.name);
            let candidate = d + step;
            if candidate <= limit && candidate < dist[next.index()] {
                dist[next.index()] = candidate;
                prev_pipe[next.index()] = pid;
                prev_node[next.index()] = node;
                heap.push(Reverse((OrderedFloat(candidate), next)));
            }
        }
    }

    ShortestPathTree { origin, dist, prev_pipe, prev_node }
}

/// Shortest path between two nodes, or `None` if `to` is unreachable.
pub fn shortest_path<F>(network: &WaterNetwork, from: NodeId, to: NodeId, cost: F) -> Option<Path>
where
    F: FnMut(&Pipe, NodeId) -> Option<f64>,
{
    shortest_path_tree(network, from, None, cost).path_to(to)
}

/// Edge cost equal to pipe length.
pub fn by_length(pipe: &Pipe, _entered: NodeId) -> Option<f64> {
    Some(pipe.length_m)
}
