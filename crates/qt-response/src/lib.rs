//! `qt-response` — post-event network response.
//!
//! Everything here consumes a damaged snapshot (failed pipes marked) or an
//! operational snapshot (failed pipes removed, reroutes added).
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`reroute`]    | `auto_reroute`, `Reroute`, `RerouteOutcome`               |
//! | [`routing`]    | `SupplyRouter` trait, `PriorityRouter`, `SupplyRoute`     |
//! | [`allocation`] | `allocate`, `Allocation`                                  |
//! | [`metrics`]    | `compute_metrics`, `ServiceMetrics`                       |
//!
//! None of the outcomes here are errors: an unreachable node, a zero-demand
//! allocation, or an empty node group each produce a well-defined value.

pub mod allocation;
pub mod metrics;
pub mod reroute;
pub mod routing;


pub use allocation::{Allocation, allocate};
pub use metrics::{ServiceMetrics, compute_metrics};
pub use reroute::{Reroute, RerouteOutcome, auto_reroute};
pub use routing::{PriorityRouter, SupplyRoute, SupplyRouter};
