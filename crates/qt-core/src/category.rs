//! Pipe material and soil categories, plus the derived pipe status.
//!
//! The categories are closed enums: a label outside the recognised set is
//! rejected at parse time with [`QtError::UnknownCategory`] rather than being
//! mapped to a silent default.  Loaders that want lenient behaviour must name
//! an explicit fallback variant.
//!
//! # Weights
//!
//! | Material      | Risk weight |   | Soil | Risk weight | Amplification |
//! |---------------|-------------|---|------|-------------|---------------|
//! | Cast iron     | 0.80        |   | Rock | 0.30        | 1.0           |
//! | Ductile iron  | 0.50        |   | Clay | 0.70        | 1.4           |
//! | PVC           | 0.30        |   | Silt | 0.75        | 1.5           |
//! |               |             |   | Sand | 0.80        | 1.6           |

use std::fmt;
use std::str::FromStr;

use crate::QtError;

// ── Material ──────────────────────────────────────────────────────────────────

/// Pipe wall material.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    CastIron,
    DuctileIron,
    Pvc,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::CastIron, Material::DuctileIron, Material::Pvc];

    /// Relative failure-risk weight fed to the failure scorer.  Brittle cast
    /// iron is the riskiest.
    pub fn risk_weight(self) -> f64 {
        match self {
            Material::CastIron    => 0.8,
            Material::DuctileIron => 0.5,
            Material::Pvc         => 0.3,
        }
    }

    /// Short tabular label (`CI`, `DI`, `PVC`).
    pub fn code(self) -> &'static str {
        match self {
            Material::CastIron    => "CI",
            Material::DuctileIron => "DI",
            Material::Pvc         => "PVC",
        }
    }
}

impl FromStr for Material {
    type Err = QtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ci" | "cast_iron" | "cast-iron" | "cast iron"             => Ok(Material::CastIron),
            "di" | "ductile_iron" | "ductile-iron" | "ductile iron"    => Ok(Material::DuctileIron),
            "pvc"                                                     => Ok(Material::Pvc),
            _ => Err(QtError::UnknownCategory { kind: "material", value: s.to_owned() }),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ── SoilType ──────────────────────────────────────────────────────────────────

/// Soil surrounding a pipe.  Loose soils amplify ground motion, rock
/// attenuates it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoilType {
    Clay,
    Sand,
    Silt,
    Rock,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [SoilType::Clay, SoilType::Sand, SoilType::Silt, SoilType::Rock];

    /// Seismic amplification applied to the base stress.
    pub fn amplification(self) -> f64 {
        match self {
            SoilType::Rock => 1.0,
            SoilType::Clay => 1.4,
            SoilType::Silt => 1.5,
            SoilType::Sand => 1.6,
        }
    }

    /// Relative failure-risk weight fed to the failure scorer.
    pub fn risk_weight(self) -> f64 {
        match self {
            SoilType::Rock => 0.3,
            SoilType::Clay => 0.7,
            SoilType::Silt => 0.75,
            SoilType::Sand => 0.8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Sand => "sand",
            SoilType::Silt => "silt",
            SoilType::Rock => "rock",
        }
    }
}

impl FromStr for SoilType {
    type Err = QtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clay" => Ok(SoilType::Clay),
            "sand" => Ok(SoilType::Sand),
            "silt" => Ok(SoilType::Silt),
            "rock" => Ok(SoilType::Rock),
            _ => Err(QtError::UnknownCategory { kind: "soil", value: s.to_owned() }),
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── PipeStatus ────────────────────────────────────────────────────────────────

/// Operational state of a pipe within one simulation run.
///
/// Never stored on a pipe: it is derived from the pipe's failure probability
/// and the threshold in force for the snapshot that owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PipeStatus {
    Healthy,
    Failed,
    /// Synthetic, non-physical pipe inserted by the auto-rerouter.
    Rerouted,
}

impl PipeStatus {
    pub fn label(self) -> &'static str {
        match self {
            PipeStatus::Healthy  => "healthy",
            PipeStatus::Failed   => "failed",
            PipeStatus::Rerouted => "rerouted",
        }
    }
}

impl fmt::Display for PipeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
