//! `qt-hazard` — from earthquake magnitude to per-pipe failure.
//!
//! # Pipeline
//!
//! ```text
//! magnitude, pipe length, soil ──▶ base_stress ──▶ temporal_stress ─┐
//!                                                                   ▼
//!          age, material weight, soil weight ──▶ FailureScorer::score
//!                                                                   ▼
//!               backbone damping ▶ exposure growth ▶ safety clamp ─▶ p
//!                                                                   ▼
//!                 70th-percentile threshold (≤ 0.65) ──▶ failed / healthy
//! ```
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`stress`] | `base_stress`, `temporal_stress`                           |
//! | [`scorer`] | `FailureScorer` trait, `WeightedScorer`, `LogisticScorer`, `adjust_probability` |
//! | [`damage`] | `apply_damage`, `dynamic_threshold`, `DamageReport`        |

pub mod damage;
pub mod scorer;
pub mod stress;


pub use damage::{DamageReport, apply_damage, dynamic_threshold};
pub use scorer::{FailureScorer, LogisticScorer, ScoreInput, WeightedScorer, adjust_probability};
pub use stress::{base_stress, base_stress_labelled, temporal_stress};
