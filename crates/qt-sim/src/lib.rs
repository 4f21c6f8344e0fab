//! `qt-sim` — one earthquake scenario, end to end.
//!
//! # Pipeline
//!
//! ```text
//! run(Scenario { magnitude, elapsed_min }):
//!   ① Damage     — score every physical pipe, derive the threshold, mark
//!                  failures on a copy of the base network.
//!   ② Isolate    — copy the damaged snapshot without its failed pipes.
//!   ③ Reroute    — reconnect stranded critical nodes with synthetic pipes.
//!   ④ Route      — supply route from the source to every critical node.
//!   ⑤ Allocate   — split the total supply over the reachable nodes.
//!   ⑥ Measure    — service ratios and connectivity loss, before vs after.
//! ```
//!
//! Every run starts from the same immutable base network; nothing carries
//! over between runs.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `run_timeline` runs its minutes on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qt_hazard::WeightedScorer;
//! use qt_network::{GeneratorConfig, generate_network};
//! use qt_response::PriorityRouter;
//! use qt_sim::{Scenario, SimBuilder};
//!
//! let base = generate_network(&GeneratorConfig::default(), 42)?;
//! let sim = SimBuilder::new(base, WeightedScorer::default(), PriorityRouter::default()).build()?;
//! let outcome = sim.run(Scenario::new(6.5, 5.0))?;
//! println!("{:.1} % critical service", outcome.metrics.critical_service_ratio);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Scenario, SimOutcome, Simulation};
