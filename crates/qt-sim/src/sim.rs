//! The `Simulation` struct and its run pipeline.

use std::collections::BTreeMap;

use tracing::{debug, info};

use qt_core::{NodeId, SimConfig};
use qt_hazard::{FailureScorer, apply_damage};
use qt_network::WaterNetwork;
use qt_response::{
    Allocation, Reroute, ServiceMetrics, SupplyRoute, SupplyRouter, allocate, auto_reroute,
    compute_metrics,
};

use crate::{NoopObserver, SimError, SimObserver, SimResult};

// ── Scenario ──────────────────────────────────────────────────────────────────

/// The external inputs of one run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scenario {
    /// Earthquake magnitude.
    pub magnitude:   f64,
    /// Minutes since the main shock.  Zero or less means no damage yet.
    pub elapsed_min: f64,
}

impl Scenario {
    pub fn new(magnitude: f64, elapsed_min: f64) -> Self {
        Self { magnitude, elapsed_min }
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.magnitude.is_finite() || self.magnitude < 0.0 {
            return Err(SimError::Scenario(format!("magnitude must be finite and >= 0, got {}", self.magnitude)));
        }
        if !self.elapsed_min.is_finite() {
            return Err(SimError::Scenario(format!("elapsed time must be finite, got {}", self.elapsed_min)));
        }
        Ok(())
    }
}

// ── SimOutcome ────────────────────────────────────────────────────────────────

/// Everything one run produces.  The base network is not included; it is
/// unchanged and available from [`Simulation::base`].
#[derive(Clone, Debug)]
pub struct SimOutcome {
    pub scenario:    Scenario,
    /// Base copy with assessments and threshold set; failed pipes retained.
    pub damaged:     WaterNetwork,
    /// Damaged copy without failed pipes, plus synthetic reroutes.
    pub operational: WaterNetwork,
    /// Threshold in force; `None` when no time has elapsed.
    pub threshold:   Option<f64>,
    pub reroutes:    Vec<Reroute>,
    /// Critical nodes the rerouter could not reconnect.
    pub stranded:    Vec<NodeId>,
    /// Critical-node set for this run, in id order.
    pub critical:    Vec<NodeId>,
    /// Supply route to every critical node over the operational network.
    pub routes:      BTreeMap<NodeId, SupplyRoute>,
    pub allocation:  Allocation,
    pub metrics:     ServiceMetrics,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Runs earthquake scenarios against one base network.
///
/// `run` takes `&self`: the base network, scorer, and router are read-only,
/// and every run works on its own copies.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Simulation<S: FailureScorer, R: SupplyRouter> {
    pub(crate) config: SimConfig,
    pub(crate) base:   WaterNetwork,
    pub(crate) scorer: S,
    pub(crate) router: R,
}

impl<S: FailureScorer, R: SupplyRouter> Simulation<S, R> {
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn base(&self) -> &WaterNetwork {
        &self.base
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run one scenario without callbacks.
    pub fn run(&self, scenario: Scenario) -> SimResult<SimOutcome> {
        self.run_with_observer(scenario, &mut NoopObserver)
    }

    /// Run one scenario, calling observer hooks at every stage boundary.
    pub fn run_with_observer<O: SimObserver>(
        &self,
        scenario: Scenario,
        observer: &mut O,
    ) -> SimResult<SimOutcome> {
        scenario.validate()?;
        observer.on_run_start(&scenario);
        let cfg = &self.config;

        // ── ① Damage ──────────────────────────────────────────────────────
        let report = apply_damage(
            &self.base,
            scenario.magnitude,
            scenario.elapsed_min,
            &self.scorer,
            &cfg.hazard,
        );
        observer.on_damage(&scenario, &report);

        // ── ②③ Isolate and reroute ────────────────────────────────────────
        let rerouted = auto_reroute(&report.network, report.network.without_failed(), &cfg.reroute);
        observer.on_reroute(&scenario, &rerouted);

        // ── ④ Route ───────────────────────────────────────────────────────
        //
        // Priorities never change within a run, so the base set is the
        // operational set.
        let critical = self.base.critical_nodes();
        let routes = self.router.routes(&rerouted.network, &critical);
        debug!(
            targets = critical.len(),
            reachable = routes.values().filter(|r| r.is_reachable()).count(),
            "critical routes computed",
        );

        // ── ⑤ Allocate ────────────────────────────────────────────────────
        let allocation = allocate(&rerouted.network, cfg.total_supply);

        // ── ⑥ Measure ─────────────────────────────────────────────────────
        let metrics = compute_metrics(&self.base, &report.network, &rerouted.network, &critical);

        info!(
            magnitude = scenario.magnitude,
            elapsed_min = scenario.elapsed_min,
            failed = metrics.failed_pipes,
            rerouted = metrics.rerouted_pipes,
            stranded = rerouted.stranded.len(),
            critical_service = metrics.critical_service_ratio,
            overall_service = metrics.overall_service_ratio,
            "run complete",
        );

        let outcome = SimOutcome {
            scenario,
            damaged:     report.network,
            operational: rerouted.network,
            threshold:   report.threshold,
            reroutes:    rerouted.reroutes,
            stranded:    rerouted.stranded,
            critical,
            routes,
            allocation,
            metrics,
        };
        observer.on_run_end(&outcome);
        Ok(outcome)
    }

    /// Run minutes `0..=minutes` at a fixed magnitude, one independent run
    /// per minute.  Outcomes come back in minute order.
    ///
    /// With the `parallel` Cargo feature the runs execute on Rayon's thread
    /// pool; the result is identical.
    pub fn run_timeline(&self, magnitude: f64, minutes: u32) -> SimResult<Vec<SimOutcome>> {
        #[cfg(not(feature = "parallel"))]
        {
            (0..=minutes)
                .map(|m| self.run(Scenario::new(magnitude, f64::from(m))))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            (0..=minutes)
                .into_par_iter()
                .map(|m| self.run(Scenario::new(magnitude, f64::from(m))))
                .collect()
        }
    }

    /// Sequential [`run_timeline`](Self::run_timeline) that reports every run
    /// to `observer`.
    pub fn run_timeline_with_observer<O: SimObserver>(
        &self,
        magnitude: f64,
        minutes:   u32,
        observer:  &mut O,
    ) -> SimResult<Vec<SimOutcome>> {
        (0..=minutes)
            .map(|m| self.run_with_observer(Scenario::new(magnitude, f64::from(m)), observer))
            .collect()
    }
}
