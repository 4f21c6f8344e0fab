//! Seismic stress estimation.
//!
//! ```text
//! base     = magnitude * amplification(soil) / (distance + 1)
//! temporal = base * (1 + growth_per_min * elapsed_min)
//! ```
//!
//! The damage phase feeds pipe length (metres) as `distance`, so the
//! `distance > -1` precondition always holds.

use qt_core::{QtResult, SoilType};

/// Peak stress on a pipe before any time accumulation.
#[inline]
pub fn base_stress(magnitude: f64, distance: f64, soil: SoilType) -> f64 {
    debug_assert!(distance > -1.0, "distance must be > -1, got {distance}");
    magnitude * soil.amplification() / (distance + 1.0)
}

/// [`base_stress`] for a raw soil label.  Fails with `UnknownCategory` for
/// labels outside clay/sand/silt/rock.
pub fn base_stress_labelled(magnitude: f64, distance: f64, soil: &str) -> QtResult<f64> {
    Ok(base_stress(magnitude, distance, soil.parse()?))
}

/// Linear stress accumulation after the main shock.  Identity at
/// `elapsed_min == 0`.
#[inline]
pub fn temporal_stress(base: f64, elapsed_min: f64, growth_per_min: f64) -> f64 {
    base * (1.0 + growth_per_min * elapsed_min)
}
