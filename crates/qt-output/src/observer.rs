//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use qt_network::{Pipe, WaterNetwork};
use qt_sim::{SimObserver, SimOutcome};

use crate::row::{MetricsRow, NodeResultRow, PipeResultRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes each finished run to any [`OutputWriter`]
/// backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the runs return, call [`finish`][Self::finish]
/// and check for errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    runs:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, runs: 0, last_error: None }
    }

    /// Number of runs written so far.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Flush the writer.  Call once after the last run.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the runs).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_run_end(&mut self, outcome: &SimOutcome) {
        let result = self.writer.write_pipes(&pipe_rows(outcome));
        self.store_err(result);
        let result = self.writer.write_nodes(&node_rows(outcome));
        self.store_err(result);
        let result = self.writer.write_metrics(&metrics_row(outcome));
        self.store_err(result);
        self.runs += 1;
    }
}

// ── Row builders ──────────────────────────────────────────────────────────────

/// Every pipe of the damaged snapshot (failed ones included), then the
/// synthetic pipes the rerouter added to the operational snapshot.
pub(crate) fn pipe_rows(outcome: &SimOutcome) -> Vec<PipeResultRow> {
    let t = outcome.scenario.elapsed_min;
    let damaged = &outcome.damaged;
    let operational = &outcome.operational;

    let row = |net: &WaterNetwork, p: &Pipe| PipeResultRow {
        elapsed_minutes:     t,
        pipe_id:             p.name.clone(),
        from:                net.node(p.from).name.clone(),
        to:                  net.node(p.to).name.clone(),
        status:              net.status_of(p),
        is_physical:         p.is_physical,
        stress:              p.assessment.map(|a| a.stress),
        failure_probability: p.assessment.map(|a| a.failure_prob),
    };

    let mut rows: Vec<PipeResultRow> = damaged.pipes().map(|(_, p)| row(damaged, p)).collect();
    rows.extend(
        outcome
            .reroutes
            .iter()
            .filter_map(|r| operational.pipe(r.pipe))
            .map(|p| row(operational, p)),
    );
    rows
}

pub(crate) fn node_rows(outcome: &SimOutcome) -> Vec<NodeResultRow> {
    let t = outcome.scenario.elapsed_min;
    let reach = outcome.operational.reachable_from_source();
    outcome
        .operational
        .nodes()
        .map(|(id, n)| NodeResultRow {
            elapsed_minutes: t,
            node_id:         n.name.clone(),
            lat:             n.pos.lat,
            lon:             n.pos.lon,
            priority:        n.priority,
            critical:        outcome.critical.contains(&id),
            served:          reach.contains(id),
            allocation:      outcome.allocation.get(id).unwrap_or(0.0),
        })
        .collect()
}

pub(crate) fn metrics_row(outcome: &SimOutcome) -> MetricsRow {
    let m = &outcome.metrics;
    MetricsRow {
        elapsed_minutes:            outcome.scenario.elapsed_min,
        magnitude:                  outcome.scenario.magnitude,
        threshold:                  outcome.threshold,
        failed_pipes:               m.failed_pipes,
        rerouted_pipes:             m.rerouted_pipes,
        stranded_critical:          outcome.stranded.len(),
        critical_nodes:             m.critical_nodes,
        normal_nodes:               m.normal_nodes,
        critical_service_ratio:     m.critical_service_ratio,
        normal_service_ratio:       m.normal_service_ratio,
        overall_service_ratio:      m.overall_service_ratio,
        critical_connectivity_loss: m.critical_connectivity_loss,
        normal_connectivity_loss:   m.normal_connectivity_loss,
        overall_connectivity_loss:  m.overall_connectivity_loss,
        components_before:          m.components_before,
        components_after:           m.components_after,
    }
}
