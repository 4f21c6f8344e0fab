//! Seeded synthetic network generator.
//!
//! Produces a random tree rooted at `N1`: node `i` is joined to a uniformly
//! chosen earlier node.  The first `critical_count` nodes are critical
//! (priority 4–5); the rest are residential (priority 1–3).  The same seed
//! always yields the same network.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use qt_core::{GeoPoint, Material, SoilType};

use crate::network::{Node, Pipe, WaterNetwork, WaterNetworkBuilder};
use crate::NetworkResult;

const MATERIALS: [Material; 3] = [Material::CastIron, Material::DuctileIron, Material::Pvc];
const SOILS:     [SoilType; 3] = [SoilType::Rock, SoilType::Clay, SoilType::Sand];

/// Shape parameters for [`generate_network`].
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub node_count:     usize,
    pub critical_count: usize,
    pub center:         GeoPoint,
    /// Half-width of the square nodes are scattered in, in degrees.
    pub radius_deg:     f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_count:     25,
            critical_count: 3,
            center:         GeoPoint::new(23.26, 77.41),
            radius_deg:     0.01,
        }
    }
}

/// Generate a tree-shaped network.  `N1` is the source.
pub fn generate_network(config: &GeneratorConfig, seed: u64) -> NetworkResult<WaterNetwork> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut b = WaterNetworkBuilder::new();
    let r = config.radius_deg;

    let mut ids = Vec::with_capacity(config.node_count);
    for i in 1..=config.node_count {
        let critical = i <= config.critical_count;
        let priority = if critical { rng.gen_range(4..=5) } else { rng.gen_range(1..=3) };
        let pos = GeoPoint::new(
            config.center.lat + rng.gen_range(-r..=r),
            config.center.lon + rng.gen_range(-r..=r),
        );
        let demand = rng.gen_range(40..=150) as f64;
        let kind = if critical { "critical" } else { "residential" };
        ids.push(b.add_node(Node::new(format!("N{i}"), pos, demand, priority).with_kind(kind))?);
    }

    for i in 1..ids.len() {
        let parent = ids[rng.gen_range(0..i)];
        let material = MATERIALS[rng.gen_range(0..MATERIALS.len())];
        let soil = SOILS[rng.gen_range(0..SOILS.len())];
        let pipe = Pipe::new(
            format!("P{}", i + 1),
            parent,
            ids[i],
            rng.gen_range(200..=800) as f64,
            material,
            soil,
        )
        .with_age(rng.gen_range(5..=50) as f64)
        .with_pressure_cap(rng.gen_range(70..=130) as f64);
        b.add_pipe(pipe)?;
    }

    b.build()
}
