//! `qt-network` — water network snapshots and graph queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`network`]   | `WaterNetwork` arena, `Node`, `Pipe`, `WaterNetworkBuilder`|
//! | [`reach`]     | `Reachability`, connected-component counting               |
//! | [`path`]      | `ShortestPathTree`, `Path`, cost-parameterised Dijkstra    |
//! | [`loader`]    | CSV node/pipe loader                                       |
//! | [`generator`] | Seeded synthetic network generator                         |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                         |

pub mod error;
pub mod generator;
pub mod loader;
pub mod network;
pub mod path;
pub mod reach;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use generator::{GeneratorConfig, generate_network};
pub use loader::{LoadOptions, load_network_csv, load_network_readers};
pub use network::{Assessment, Node, Pipe, WaterNetwork, WaterNetworkBuilder};
pub use path::{Path, ShortestPathTree, by_length, shortest_path, shortest_path_tree};
pub use reach::{Reachability, component_count};
