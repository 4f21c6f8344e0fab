//! Automatic rerouting for stranded critical nodes.
//!
//! A critical node is *stranded* when the operational network (failed pipes
//! removed) no longer connects it to the source.  For each stranded node, in
//! id order, the rerouter looks for the nearest *donor*: a node still
//! connected to the source, other than the source itself.
//!
//! # Donor search
//!
//! Distances are measured along the pipe corridor of the damaged snapshot,
//! i.e. every physical pipe including failed ones: a reroute is a bypass laid
//! along the existing trench, so failed segments still count toward its
//! length.  A candidate path is feasible only if
//!
//! - its total length is `<= max_distance`, and
//! - every pipe on it has `pressure_cap >= min_pressure`.
//!
//! Pipes below the pressure floor are pruned from the search, so the chosen
//! path is the shortest pressure-feasible one.  Among feasible donors the
//! minimum distance wins; equal distances are broken by ascending node name.
//!
//! The donor set and the stranded set are both fixed before the first
//! reroute is inserted, and each stranded node gets exactly one attempt.
//! The synthetic pipe only ever lands in the operational snapshot.

use tracing::{debug, warn};

use qt_core::{NodeId, PipeId, RerouteConfig};
use qt_network::{WaterNetwork, shortest_path_tree};

/// One inserted synthetic pipe.
#[derive(Clone, Debug, PartialEq)]
pub struct Reroute {
    /// Id of the synthetic pipe in the operational snapshot.
    pub pipe:         PipeId,
    pub donor:        NodeId,
    pub node:         NodeId,
    /// Corridor length; also the synthetic pipe's length.
    pub distance:     f64,
    /// Lowest pressure capacity along the corridor.
    pub min_pressure: f64,
    /// Physical pipes the corridor follows, stranded node first.
    pub corridor:     Vec<PipeId>,
}

/// Output of [`auto_reroute`].
#[derive(Clone, Debug)]
pub struct RerouteOutcome {
    /// Operational snapshot with zero or more synthetic pipes added.
    pub network:  WaterNetwork,
    pub reroutes: Vec<Reroute>,
    /// Critical nodes that were stranded and found no feasible donor.
    pub stranded: Vec<NodeId>,
}

/// Reconnect stranded critical nodes of `operational` where feasible.
///
/// `damaged` supplies the pipe corridor; `operational` must be derived from
/// it with the failed pipes removed.
pub fn auto_reroute(
    damaged:     &WaterNetwork,
    operational: WaterNetwork,
    config:      &RerouteConfig,
) -> RerouteOutcome {
    let mut network = operational;
    let source = network.source();
    let reach = network.reachable_from_source();

    let lost: Vec<NodeId> = network
        .critical_nodes()
        .into_iter()
        .filter(|&n| !reach.contains(n))
        .collect();

    let mut reroutes = Vec::new();
    let mut stranded = Vec::new();

    for node in lost {
        let tree = shortest_path_tree(damaged, node, Some(config.max_distance), |pipe, _| {
            (pipe.is_physical && pipe.pressure_cap >= config.min_pressure).then_some(pipe.length_m)
        });

        let donor = tree
            .reached()
            .filter(|&(n, _)| n != source && reach.contains(n))
            .min_by(|(a, da), (b, db)| {
                da.total_cmp(db).then_with(|| damaged.node(*a).name.cmp(&damaged.node(*b).name))
            });

        let Some((donor, distance)) = donor else {
            warn!(node = %network.node(node).name, "no feasible donor; critical node stays stranded");
            stranded.push(node);
            continue;
        };
        let Some(path) = tree.path_to(donor) else {
            stranded.push(node);
            continue;
        };

        let min_pressure = path
            .pipes
            .iter()
            .filter_map(|&p| damaged.pipe(p))
            .map(|p| p.pressure_cap)
            .fold(f64::INFINITY, f64::min);
        let pipe = network.add_synthetic_pipe(donor, node, distance, config.failure_prob, min_pressure);

        debug!(
            donor = %network.node(donor).name,
            node = %network.node(node).name,
            distance,
            min_pressure,
            "rerouted critical node",
        );
        reroutes.push(Reroute { pipe, donor, node, distance, min_pressure, corridor: path.pipes });
    }

    RerouteOutcome { network, reroutes, stranded }
}
