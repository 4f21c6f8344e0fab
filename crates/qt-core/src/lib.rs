//! `qt-core` — foundational types for the `quake_twin` water network
//! simulator.
//!
//! This crate is a dependency of every other `qt-*` crate.  It has no `qt-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `PipeId`                                    |
//! | [`geo`]      | `GeoPoint`                                            |
//! | [`category`] | `Material`, `SoilType`, `PipeStatus`                  |
//! | [`config`]   | `SimConfig`, `HazardConfig`, `RerouteConfig`, …       |
//! | [`error`]    | `QtError`, `QtResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod category;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::{Material, PipeStatus, SoilType};
pub use config::{HazardConfig, RerouteConfig, RoutingConfig, SimConfig};
pub use error::{QtError, QtResult};
pub use geo::GeoPoint;
pub use ids::{NodeId, PipeId};

/// Minimum priority at which a node counts as critical (hospitals, fire
/// stations, …).
pub const CRITICAL_PRIORITY: u8 = 4;
