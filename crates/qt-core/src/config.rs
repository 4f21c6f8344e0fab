//! Simulation configuration.
//!
//! Every tunable of the damage → reroute → route → allocate pipeline lives
//! here with its default.  The per-run inputs (magnitude and elapsed
//! minutes) are not configuration; they belong to `qt_sim::Scenario`.

use crate::{QtError, QtResult};

// ── HazardConfig ──────────────────────────────────────────────────────────────

/// Stress accumulation, failure-probability adjustment, and dynamic
/// threshold parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardConfig {
    /// Fractional stress growth per elapsed minute.  Default: 0.08.
    pub stress_growth_per_min: f64,

    /// Fractional failure-probability growth per elapsed minute.  Default: 0.05.
    pub exposure_growth_per_min: f64,

    /// Pressure capacity above which a pipe is treated as a reinforced
    /// backbone main.  Default: 120.
    pub backbone_capacity: f64,

    /// Multiplier (< 1) applied to backbone failure scores.  Default: 0.7.
    pub backbone_damping: f64,

    /// Lower clamp on every scored probability.  Default: 0.05.
    pub min_failure_prob: f64,

    /// Percentile of the probability distribution used as the failure
    /// threshold.  Default: 0.70.
    pub threshold_percentile: f64,

    /// Upper clamp on the dynamic threshold.  Default: 0.65.
    pub threshold_cap: f64,

    /// Threshold used when the network has no pipes.  Default: 0.6.
    pub default_threshold: f64,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            stress_growth_per_min:   0.08,
            exposure_growth_per_min: 0.05,
            backbone_capacity:       120.0,
            backbone_damping:        0.7,
            min_failure_prob:        0.05,
            threshold_percentile:    0.70,
            threshold_cap:           0.65,
            default_threshold:       0.6,
        }
    }
}

// ── RerouteConfig ─────────────────────────────────────────────────────────────

/// Feasibility limits for synthetic reroute pipes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RerouteConfig {
    /// Longest donor → stranded-node path accepted, in length units (m).
    /// Default: 800.
    pub max_distance: f64,

    /// Minimum pressure capacity every pipe on the donor path must carry.
    /// Default: 80.
    pub min_pressure: f64,

    /// Nominal failure probability stamped on each synthetic pipe.
    /// Default: 0.1.
    pub failure_prob: f64,
}

impl Default for RerouteConfig {
    fn default() -> Self {
        Self { max_distance: 800.0, min_pressure: 80.0, failure_prob: 0.1 }
    }
}

// ── RoutingConfig ─────────────────────────────────────────────────────────────

/// Edge-cost coefficients for critical supply routing:
///
/// ```text
/// cost = length + risk_weight * risk - priority_weight * priority(entered node)
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingConfig {
    /// Default: 50.
    pub risk_weight: f64,
    /// Default: 20.
    pub priority_weight: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self { risk_weight: 50.0, priority_weight: 20.0 }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built with `SimConfig::default()` and field overrides, or
/// deserialized by the application (feature `serde`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total water supply distributed by the allocator.  Default: 500.
    pub total_supply: f64,

    pub hazard:  HazardConfig,
    pub reroute: RerouteConfig,
    pub routing: RoutingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_supply: 500.0,
            hazard:       HazardConfig::default(),
            reroute:      RerouteConfig::default(),
            routing:      RoutingConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reject values that would break the pipeline's invariants.
    pub fn validate(&self) -> QtResult<()> {
        let h = &self.hazard;
        check(self.total_supply.is_finite() && self.total_supply >= 0.0, "total_supply must be finite and >= 0")?;
        check(h.stress_growth_per_min >= 0.0, "hazard.stress_growth_per_min must be >= 0")?;
        check(h.exposure_growth_per_min >= 0.0, "hazard.exposure_growth_per_min must be >= 0")?;
        check(h.backbone_damping > 0.0 && h.backbone_damping <= 1.0, "hazard.backbone_damping must be in (0, 1]")?;
        check(h.min_failure_prob > 0.0 && h.min_failure_prob < 1.0, "hazard.min_failure_prob must be in (0, 1)")?;
        check((0.0..=1.0).contains(&h.threshold_percentile), "hazard.threshold_percentile must be in [0, 1]")?;
        check(h.threshold_cap > 0.0 && h.threshold_cap <= 1.0, "hazard.threshold_cap must be in (0, 1]")?;
        check(h.default_threshold > 0.0 && h.default_threshold <= 1.0, "hazard.default_threshold must be in (0, 1]")?;
        check(self.reroute.max_distance > 0.0, "reroute.max_distance must be > 0")?;
        check(self.reroute.min_pressure >= 0.0, "reroute.min_pressure must be >= 0")?;
        check((0.0..=1.0).contains(&self.reroute.failure_prob), "reroute.failure_prob must be in [0, 1]")?;
        Ok(())
    }
}

fn check(ok: bool, msg: &str) -> QtResult<()> {
    if ok { Ok(()) } else { Err(QtError::Config(msg.to_owned())) }
}
