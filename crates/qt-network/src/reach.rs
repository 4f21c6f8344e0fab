//! Undirected reachability and connected components.

use std::collections::VecDeque;

use qt_core::NodeId;

use crate::network::WaterNetwork;

/// The set of nodes reachable from one start node over live pipes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reachability {
    start:   NodeId,
    reached: Vec<bool>,
    count:   usize,
}

impl Reachability {
    /// Breadth-first search from `start`.
    pub fn from(network: &WaterNetwork, start: NodeId) -> Self {
        let mut reached = vec![false; network.node_count()];
        let count = flood(network, start, &mut reached);
        Self { start, reached, count }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.reached.get(node.index()).copied().unwrap_or(false)
    }

    /// Number of reached nodes, including the start node.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reached nodes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.reached
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r)
            .map(|(i, _)| NodeId(i as u32))
    }
}

/// Number of connected components over live pipes.  Isolated nodes count as
/// one component each.
pub fn component_count(network: &WaterNetwork) -> usize {
    let mut seen = vec![false; network.node_count()];
    let mut components = 0;
    for i in 0..network.node_count() {
        if !seen[i] {
            flood(network, NodeId(i as u32), &mut seen);
            components += 1;
        }
    }
    components
}

/// Mark everything connected to `start` in `seen`; returns how many nodes
/// were newly marked.
fn flood(network: &WaterNetwork, start: NodeId, seen: &mut [bool]) -> usize {
    if start.index() >= seen.len() || seen[start.index()] {
        return 0;
    }
    let mut queue = VecDeque::from([start]);
    seen[start.index()] = true;
    let mut marked = 1;

    while let Some(node) = queue.pop_front() {
        for (_, _, next) in network.neighbors(node) {
            if !seen[next.index()] {
                seen[next.index()] = true;
                marked += 1;
                queue.push_back(next);
            }
        }
    }
    marked
}
