//! Fluent builder for constructing a [`Simulation`].

use qt_core::SimConfig;
use qt_hazard::FailureScorer;
use qt_network::WaterNetwork;
use qt_response::SupplyRouter;

use crate::{SimResult, Simulation};

/// Fluent builder for [`Simulation<S, R>`].
///
/// # Required inputs
///
/// - the base [`WaterNetwork`], from the loader or the generator
/// - `S: FailureScorer`, e.g. [`qt_hazard::WeightedScorer`]
/// - `R: SupplyRouter`, e.g. [`qt_response::PriorityRouter`]
///
/// # Optional inputs
///
/// | Method        | Default                |
/// |---------------|------------------------|
/// | `.config(c)`  | `SimConfig::default()` |
pub struct SimBuilder<S: FailureScorer, R: SupplyRouter> {
    base:   WaterNetwork,
    config: Option<SimConfig>,
    scorer: S,
    router: R,
}

impl<S: FailureScorer, R: SupplyRouter> SimBuilder<S, R> {
    pub fn new(base: WaterNetwork, scorer: S, router: R) -> Self {
        Self { base, config: None, scorer, router }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Simulation`].
    pub fn build(self) -> SimResult<Simulation<S, R>> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        Ok(Simulation {
            config,
            base:   self.base,
            scorer: self.scorer,
            router: self.router,
        })
    }
}
