//! CSV network loader.
//!
//! # CSV format
//!
//! Two files, one row per node and one row per pipe:
//!
//! ```csv
//! node_id,lat,lon,priority,type,demand
//! N1,23.2600,77.4100,5,critical,120
//! N2,23.2650,77.4120,2,residential,60
//! ```
//!
//! ```csv
//! pipe_id,from,to,length,material,age,soil,pressure_cap
//! P2,N1,N2,420,CI,35,clay,95
//! ```
//!
//! The pipe file may carry two optional columns: `is_physical` (`1`/`0` or
//! `true`/`false`, default physical) and `risk` (routing risk factor, empty
//! or absent means 0).
//!
//! Material and soil labels outside the recognised set fail the load with
//! `UnknownCategory` unless [`LoadOptions`] names an explicit fallback.

use std::io::Read;
use std::path::Path as FsPath;

use serde::Deserialize;

use qt_core::{GeoPoint, Material, QtError, SoilType};

use crate::network::{Node, Pipe, WaterNetwork, WaterNetworkBuilder};
use crate::{NetworkError, NetworkResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    node_id:  String,
    lat:      f64,
    lon:      f64,
    priority: u8,
    #[serde(rename = "type", default)]
    kind:     String,
    demand:   f64,
}

#[derive(Deserialize)]
struct PipeRecord {
    pipe_id:      String,
    from:         String,
    to:           String,
    length:       f64,
    material:     String,
    age:          f64,
    soil:         String,
    pressure_cap: f64,
    #[serde(default)]
    is_physical:  Option<String>,
    #[serde(default)]
    risk:         Option<f64>,
}

// ── Options ───────────────────────────────────────────────────────────────────

/// Loader behaviour switches.  The default is strict.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Name of the source node.  `None` selects the first node row.
    pub source:            Option<String>,
    /// Material substituted for unrecognised labels.  `None` fails fast.
    pub fallback_material: Option<Material>,
    /// Soil substituted for unrecognised labels.  `None` fails fast.
    pub fallback_soil:     Option<SoilType>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a network from a node CSV and a pipe CSV on disk.
pub fn load_network_csv(
    nodes_path: &FsPath,
    pipes_path: &FsPath,
    options:    &LoadOptions,
) -> NetworkResult<WaterNetwork> {
    let nodes = std::fs::File::open(nodes_path)?;
    let pipes = std::fs::File::open(pipes_path)?;
    load_network_readers(nodes, pipes, options)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded datasets.
pub fn load_network_readers<N: Read, P: Read>(
    nodes:   N,
    pipes:   P,
    options: &LoadOptions,
) -> NetworkResult<WaterNetwork> {
    let mut b = WaterNetworkBuilder::new();

    // ── Nodes ─────────────────────────────────────────────────────────────
    for row in csv::Reader::from_reader(nodes).deserialize::<NodeRecord>() {
        let r = row?;
        let node = Node::new(r.node_id, GeoPoint::new(r.lat, r.lon), r.demand, r.priority)
            .with_kind(r.kind);
        b.add_node(node)?;
    }

    // ── Pipes ─────────────────────────────────────────────────────────────
    for row in csv::Reader::from_reader(pipes).deserialize::<PipeRecord>() {
        let r = row?;
        let from = b.node_id(&r.from).ok_or_else(|| NetworkError::UnknownNode(r.from.clone()))?;
        let to   = b.node_id(&r.to).ok_or_else(|| NetworkError::UnknownNode(r.to.clone()))?;
        let material = resolve(r.material.parse::<Material>(), options.fallback_material)?;
        let soil     = resolve(r.soil.parse::<SoilType>(), options.fallback_soil)?;

        let mut pipe = Pipe::new(r.pipe_id, from, to, r.length, material, soil)
            .with_age(r.age)
            .with_pressure_cap(r.pressure_cap);
        pipe.risk = r.risk;
        if let Some(flag) = r.is_physical.as_deref() {
            pipe.is_physical = parse_flag(flag).ok_or_else(|| NetworkError::InvalidPipe {
                pipe:   pipe.name.clone(),
                reason: "is_physical must be 0/1 or true/false",
            })?;
        }
        b.add_pipe(pipe)?;
    }

    if let Some(name) = &options.source {
        let id = b.node_id(name).ok_or_else(|| NetworkError::UnknownNode(name.clone()))?;
        b.set_source(id);
    }

    b.build()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn resolve<T>(parsed: Result<T, QtError>, fallback: Option<T>) -> Result<T, QtError> {
    match (parsed, fallback) {
        (Ok(v), _)                                           => Ok(v),
        (Err(QtError::UnknownCategory { .. }), Some(default)) => Ok(default),
        (Err(e), _)                                          => Err(e),
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true"  => Some(true),
        "0" | "false"      => Some(false),
        _ => None,
    }
}
