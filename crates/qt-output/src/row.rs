//! Plain data row types written by output backends.

use qt_core::PipeStatus;

/// One pipe's result for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeResultRow {
    pub elapsed_minutes:     f64,
    pub pipe_id:             String,
    pub from:                String,
    pub to:                  String,
    pub status:              PipeStatus,
    pub is_physical:         bool,
    /// `None` before the damage phase has scored the pipe.
    pub stress:              Option<f64>,
    pub failure_probability: Option<f64>,
}

/// One node's result for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeResultRow {
    pub elapsed_minutes: f64,
    pub node_id:         String,
    pub lat:             f64,
    pub lon:             f64,
    pub priority:        u8,
    pub critical:        bool,
    /// Connected to the source on the operational network.
    pub served:          bool,
    /// Allocated supply; 0 when not served.
    pub allocation:      f64,
}

/// Run-level summary: scenario, threshold, and every service metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub elapsed_minutes:            f64,
    pub magnitude:                  f64,
    pub threshold:                  Option<f64>,
    pub failed_pipes:               usize,
    pub rerouted_pipes:             usize,
    pub stranded_critical:          usize,
    pub critical_nodes:             usize,
    pub normal_nodes:               usize,
    pub critical_service_ratio:     f64,
    pub normal_service_ratio:       f64,
    pub overall_service_ratio:      f64,
    pub critical_connectivity_loss: f64,
    pub normal_connectivity_loss:   f64,
    pub overall_connectivity_loss:  f64,
    pub components_before:          usize,
    pub components_after:           usize,
}
