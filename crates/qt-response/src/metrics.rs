//! Before/after service metrics.
//!
//! Ratios are percentages in `[0, 100]`.  Each group's connectivity loss is
//! `100 - service_ratio`, so the two always sum to 100.  An empty group
//! reports a 0 % service ratio (and therefore 100 % loss) instead of
//! dividing by zero.

use qt_core::NodeId;
use qt_network::{WaterNetwork, component_count};

/// Service continuity summary for one run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceMetrics {
    /// Pipes whose derived status is failed in the damaged snapshot.
    pub failed_pipes:   usize,
    /// Synthetic pipes present in the operational snapshot.
    pub rerouted_pipes: usize,

    pub critical_nodes:  usize,
    pub normal_nodes:    usize,
    pub critical_served: usize,
    pub normal_served:   usize,

    pub critical_service_ratio: f64,
    pub normal_service_ratio:   f64,
    pub overall_service_ratio:  f64,

    pub critical_connectivity_loss: f64,
    pub normal_connectivity_loss:   f64,
    pub overall_connectivity_loss:  f64,

    /// Connected components of the base network.
    pub components_before: usize,
    /// Connected components of the operational network.
    pub components_after:  usize,
}

/// Compare the base network against the outcome of one run.
///
/// - `damaged`: failed pipes still present, used for the failure count;
/// - `operational`: failed pipes removed and reroutes added, used for
///   service;
/// - `critical`: critical-node set computed for this run.
pub fn compute_metrics(
    before:      &WaterNetwork,
    damaged:     &WaterNetwork,
    operational: &WaterNetwork,
    critical:    &[NodeId],
) -> ServiceMetrics {
    let reach = operational.reachable_from_source();

    let mut is_critical = vec![false; operational.node_count()];
    for &n in critical {
        if let Some(flag) = is_critical.get_mut(n.index()) {
            *flag = true;
        }
    }

    let critical_nodes = is_critical.iter().filter(|&&c| c).count();
    let normal_nodes = operational.node_count() - critical_nodes;
    let critical_served = reach.iter().filter(|n| is_critical[n.index()]).count();
    let normal_served = reach.len() - critical_served;

    let critical_service_ratio = percent(critical_served, critical_nodes);
    let normal_service_ratio = percent(normal_served, normal_nodes);
    let overall_service_ratio = percent(reach.len(), operational.node_count());

    ServiceMetrics {
        failed_pipes: damaged.failed_pipes().len(),
        rerouted_pipes: operational.pipes().filter(|(_, p)| !p.is_physical).count(),
        critical_nodes,
        normal_nodes,
        critical_served,
        normal_served,
        critical_service_ratio,
        normal_service_ratio,
        overall_service_ratio,
        critical_connectivity_loss: 100.0 - critical_service_ratio,
        normal_connectivity_loss:   100.0 - normal_service_ratio,
        overall_connectivity_loss:  100.0 - overall_service_ratio,
        components_before: component_count(before),
        components_after:  component_count(operational),
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 * 100.0 / whole as f64 }
}
