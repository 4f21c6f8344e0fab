//! Pluggable pipe failure scoring.
//!
//! The damage phase depends only on the [`FailureScorer`] contract:
//!
//! - output is bounded to `[0, 1]`;
//! - output is monotonically non-decreasing in `stress` and in `age_years`
//!   with the other inputs held fixed.
//!
//! Two implementations ship here: the deterministic [`WeightedScorer`] and
//! the trained [`LogisticScorer`].  Any `Fn(&ScoreInput) -> f64` closure also
//! implements the trait.  Scorers are immutable once built and are passed to
//! the damage phase explicitly; there is no process-wide model.
//!
//! [`adjust_probability`] applies the post-score corrections (backbone
//! damping, exposure growth, safety clamp) that every scorer shares.

use qt_core::{HazardConfig, QtError, QtResult};

// ── Contract ──────────────────────────────────────────────────────────────────

/// Scorer input for one pipe.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScoreInput {
    pub stress:          f64,
    pub age_years:       f64,
    pub material_weight: f64,
    pub soil_weight:     f64,
}

impl ScoreInput {
    fn features(&self) -> [f64; 4] {
        [self.stress, self.age_years, self.material_weight, self.soil_weight]
    }
}

/// Failure probability model.
///
/// Implementations must be `Send + Sync` so one scorer can serve parallel
/// timeline runs.
pub trait FailureScorer: Send + Sync {
    /// Raw failure probability in `[0, 1]`.
    fn score(&self, input: &ScoreInput) -> f64;
}

impl<F> FailureScorer for F
where
    F: Fn(&ScoreInput) -> f64 + Send + Sync,
{
    fn score(&self, input: &ScoreInput) -> f64 {
        self(input)
    }
}

// ── WeightedScorer ────────────────────────────────────────────────────────────

/// Deterministic weighted risk formula:
///
/// ```text
/// 0.35·stress + 0.25·(age / 50) + 0.2·material_weight + 0.2·soil_weight
/// ```
///
/// clamped to `[0, 1]`.  Used when no trained model is available.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedScorer {
    pub stress_weight:   f64,
    pub age_weight:      f64,
    /// Age (years) that maps to a normalised age of 1.
    pub age_norm_years:  f64,
    pub material_weight: f64,
    pub soil_weight:     f64,
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self {
            stress_weight:   0.35,
            age_weight:      0.25,
            age_norm_years:  50.0,
            material_weight: 0.2,
            soil_weight:     0.2,
        }
    }
}

impl FailureScorer for WeightedScorer {
    fn score(&self, i: &ScoreInput) -> f64 {
        let raw = self.stress_weight * i.stress
            + self.age_weight * (i.age_years / self.age_norm_years)
            + self.material_weight * i.material_weight
            + self.soil_weight * i.soil_weight;
        raw.clamp(0.0, 1.0)
    }
}

// ── LogisticScorer ────────────────────────────────────────────────────────────

const EPOCHS:        usize = 2_000;
const LEARNING_RATE: f64   = 0.05;

/// Reference training set: `(stress, age, material_weight, soil_weight)` and
/// whether the pipe failed.
const REFERENCE_SAMPLES: [([f64; 4], bool); 4] = [
    ([0.2, 10.0, 0.3, 0.2], false),
    ([0.8, 40.0, 0.8, 0.7], true),
    ([0.6, 30.0, 0.6, 0.5], true),
    ([0.9, 50.0, 0.9, 0.8], true),
];

/// Logistic classifier over standardised features.
///
/// Weights are kept non-negative during training, so the monotonicity
/// contract holds for any training set.
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticScorer {
    mean:    [f64; 4],
    scale:   [f64; 4],
    weights: [f64; 4],
    bias:    f64,
}

impl LogisticScorer {
    /// Build from explicit parameters.  `scale` must be positive and
    /// `weights` non-negative.
    pub fn new(mean: [f64; 4], scale: [f64; 4], weights: [f64; 4], bias: f64) -> QtResult<Self> {
        if scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(QtError::Config("logistic scale must be positive".into()));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(QtError::Config("logistic weights must be non-negative".into()));
        }
        Ok(Self { mean, scale, weights, bias })
    }

    /// Train on labelled samples by L2-regularised batch gradient descent.
    pub fn fit(samples: &[(ScoreInput, bool)]) -> QtResult<Self> {
        if samples.is_empty() {
            return Err(QtError::Config("logistic scorer needs at least one sample".into()));
        }
        let rows: Vec<([f64; 4], bool)> = samples.iter().map(|(s, y)| (s.features(), *y)).collect();
        Ok(train(&rows))
    }

    /// Scorer trained on the built-in four-sample reference set.
    pub fn reference() -> Self {
        train(&REFERENCE_SAMPLES)
    }

    pub fn weights(&self) -> [f64; 4] {
        self.weights
    }

    fn logit(&self, x: [f64; 4]) -> f64 {
        (0..4).fold(self.bias, |z, k| z + self.weights[k] * (x[k] - self.mean[k]) / self.scale[k])
    }
}

impl FailureScorer for LogisticScorer {
    fn score(&self, input: &ScoreInput) -> f64 {
        sigmoid(self.logit(input.features()))
    }
}

fn train(rows: &[([f64; 4], bool)]) -> LogisticScorer {
    let n = rows.len() as f64;

    // ── Standardise ───────────────────────────────────────────────────────
    let mut mean = [0.0; 4];
    let mut scale = [0.0; 4];
    for k in 0..4 {
        mean[k] = rows.iter().map(|(x, _)| x[k]).sum::<f64>() / n;
        let var = rows.iter().map(|(x, _)| (x[k] - mean[k]).powi(2)).sum::<f64>() / n;
        scale[k] = if var > 0.0 { var.sqrt() } else { 1.0 };
    }
    let standardised: Vec<([f64; 4], f64)> = rows
        .iter()
        .map(|(x, y)| {
            let mut z = [0.0; 4];
            for k in 0..4 {
                z[k] = (x[k] - mean[k]) / scale[k];
            }
            (z, if *y { 1.0 } else { 0.0 })
        })
        .collect();

    // ── Gradient descent, projected onto w >= 0 ───────────────────────────
    let mut weights = [0.0; 4];
    let mut bias = 0.0;
    for _ in 0..EPOCHS {
        let mut grad_w = weights; // L2 term
        let mut grad_b = 0.0;
        for (z, y) in &standardised {
            let logit = (0..4).fold(bias, |acc, k| acc + weights[k] * z[k]);
            let err = sigmoid(logit) - y;
            for k in 0..4 {
                grad_w[k] += err * z[k];
            }
            grad_b += err;
        }
        for k in 0..4 {
            weights[k] = (weights[k] - LEARNING_RATE * grad_w[k]).max(0.0);
        }
        bias -= LEARNING_RATE * grad_b;
    }

    LogisticScorer { mean, scale, weights, bias }
}

#[inline]
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

// ── Post-score adjustments ────────────────────────────────────────────────────

/// Apply the shared corrections to a raw score, in order:
///
/// 1. backbone damping when `pressure_cap > backbone_capacity`;
/// 2. exposure growth `× (1 + growth · elapsed_min)`, capped at 1;
/// 3. safety clamp to `[min_failure_prob, 1]`.
pub fn adjust_probability(raw: f64, pressure_cap: f64, elapsed_min: f64, config: &HazardConfig) -> f64 {
    let mut p = raw.clamp(0.0, 1.0);
    if pressure_cap > config.backbone_capacity {
        p *= config.backbone_damping;
    }
    p = (p * (1.0 + config.exposure_growth_per_min * elapsed_min)).min(1.0);
    p.clamp(config.min_failure_prob, 1.0)
}
