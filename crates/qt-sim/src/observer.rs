//! Simulation observer trait for progress reporting and data collection.

use qt_hazard::DamageReport;
use qt_response::RerouteOutcome;

use crate::{Scenario, SimOutcome};

/// Callbacks invoked by [`Simulation::run_with_observer`][crate::Simulation::run_with_observer]
/// at each stage boundary.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — stranded node reporter
///
/// ```rust,ignore
/// struct StrandedPrinter;
///
/// impl SimObserver for StrandedPrinter {
///     fn on_reroute(&mut self, scenario: &Scenario, outcome: &RerouteOutcome) {
///         for &n in &outcome.stranded {
///             println!("t={}: {} stranded", scenario.elapsed_min, outcome.network.node(n).name);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any processing, once the scenario has been validated.
    fn on_run_start(&mut self, _scenario: &Scenario) {}

    /// Called after the damage phase.  The report's network still holds the
    /// failed pipes.
    fn on_damage(&mut self, _scenario: &Scenario, _report: &DamageReport) {}

    /// Called after the auto-rerouter, before routing and allocation.
    fn on_reroute(&mut self, _scenario: &Scenario, _outcome: &RerouteOutcome) {}

    /// Called with the finished outcome, just before the run returns it.
    fn on_run_end(&mut self, _outcome: &SimOutcome) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
