//! Demand × priority weighted supply allocation.

use std::collections::BTreeMap;

use qt_core::NodeId;
use qt_network::WaterNetwork;

/// Supply share per node reachable from the source.
///
/// Unreachable nodes have no entry at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Allocation {
    shares:          BTreeMap<NodeId, f64>,
    weighted_demand: f64,
}

impl Allocation {
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.shares.get(&node).copied()
    }

    /// `(node, share)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.shares.iter().map(|(&n, &s)| (n, s))
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Sum of all shares.
    pub fn total(&self) -> f64 {
        self.shares.values().sum()
    }

    /// `Σ demand × priority` over the reachable nodes.
    pub fn weighted_demand(&self) -> f64 {
        self.weighted_demand
    }

    /// `true` when the weighted demand is zero and every share is zero.
    pub fn is_degenerate(&self) -> bool {
        self.weighted_demand <= 0.0
    }
}

/// Split `total_supply` across the nodes reachable from the source in
/// proportion to `demand × priority`.
pub fn allocate(network: &WaterNetwork, total_supply: f64) -> Allocation {
    let reach = network.reachable_from_source();
    let weight = |n: NodeId| {
        let node = network.node(n);
        node.demand * f64::from(node.priority)
    };
    let weighted_demand: f64 = reach.iter().map(weight).sum();

    let shares = reach
        .iter()
        .map(|n| {
            let share = if weighted_demand > 0.0 {
                total_supply * weight(n) / weighted_demand
            } else {
                0.0
            };
            (n, share)
        })
        .collect();

    Allocation { shares, weighted_demand }
}
