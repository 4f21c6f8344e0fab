//! Damage application: score every physical pipe and classify it.
//!
//! The output is a new snapshot; the base network is never touched.  Failed
//! pipes stay in the damaged snapshot so it keeps the full topology for
//! display.  Their status is derived by the snapshot from each pipe's
//! probability and the threshold stored alongside.

use tracing::debug;

use qt_core::HazardConfig;
use qt_network::{Assessment, WaterNetwork};

use crate::scorer::{FailureScorer, ScoreInput, adjust_probability};
use crate::stress::{base_stress, temporal_stress};

/// Output of [`apply_damage`].
#[derive(Clone, Debug)]
pub struct DamageReport {
    /// Damaged snapshot: assessments and threshold set, topology intact.
    pub network:   WaterNetwork,
    /// Threshold in force for this run; `None` when no time has elapsed.
    pub threshold: Option<f64>,
    /// Number of pipes classified as failed.
    pub failed:    usize,
}

/// Score every physical pipe of `base` for an earthquake of `magnitude`,
/// `elapsed_min` minutes after the main shock.
///
/// At `elapsed_min <= 0` the damaged network is an unmodified copy of the
/// base: no stress, no probability, no threshold, no failures.
pub fn apply_damage(
    base:        &WaterNetwork,
    magnitude:   f64,
    elapsed_min: f64,
    scorer:      &dyn FailureScorer,
    config:      &HazardConfig,
) -> DamageReport {
    let mut network = base.clone();
    if elapsed_min <= 0.0 {
        debug!(magnitude, "no elapsed time; damage phase skipped");
        return DamageReport { network, threshold: None, failed: 0 };
    }

    let scored: Vec<_> = base
        .pipes()
        .filter(|(_, p)| p.is_physical)
        .map(|(id, p)| {
            let base = base_stress(magnitude, p.length_m, p.soil);
            let stress = temporal_stress(base, elapsed_min, config.stress_growth_per_min);
            let raw = scorer.score(&ScoreInput {
                stress,
                age_years:       p.age_years,
                material_weight: p.material.risk_weight(),
                soil_weight:     p.soil.risk_weight(),
            });
            let failure_prob = adjust_probability(raw, p.pressure_cap, elapsed_min, config);
            (id, Assessment { stress, failure_prob })
        })
        .collect();

    let probabilities: Vec<f64> = scored.iter().map(|(_, a)| a.failure_prob).collect();
    let threshold = dynamic_threshold(&probabilities, config);

    for (id, assessment) in scored {
        network.set_assessment(id, assessment);
    }
    network.set_failure_threshold(threshold);

    let failed = probabilities.iter().filter(|&&p| p > threshold).count();
    debug!(magnitude, elapsed_min, pipes = probabilities.len(), threshold, failed, "damage applied");

    DamageReport { network, threshold: Some(threshold), failed }
}

/// Failure threshold for one run: the configured percentile of
/// `probabilities` (linear interpolation), capped at `threshold_cap`.
/// Falls back to `default_threshold` for an empty slice.
pub fn dynamic_threshold(probabilities: &[f64], config: &HazardConfig) -> f64 {
    if probabilities.is_empty() {
        return config.default_threshold;
    }
    let mut sorted = probabilities.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = config.threshold_percentile * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let value = sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64);
    value.min(config.threshold_cap)
}
