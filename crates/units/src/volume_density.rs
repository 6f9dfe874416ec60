use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::length::PC_TO_M;
use crate::mass::SOLAR_MASS_KG;

/// M☉/pc³ expressed in kg/m³
pub const SOLAR_PER_PC3_TO_KG_PER_M3: f64 = SOLAR_MASS_KG / (PC_TO_M * PC_TO_M * PC_TO_M);

/// A mass volume density quantity using f64 precision.
///
/// Base unit is kg/m³. Snapshot density columns default to M☉/pc³.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VolumeDensity(f64); // Base unit: kg/m³

impl VolumeDensity {
    /// Creates a zero density value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `VolumeDensity` from a value in kg/m³.
    pub fn from_kg_per_m3(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `VolumeDensity` from a value in g/cm³.
    pub fn from_g_per_cm3(value: f64) -> Self {
        Self(value * 1e3)
    }

    /// Creates a new `VolumeDensity` from a value in M☉/pc³.
    pub fn from_solar_masses_per_pc3(value: f64) -> Self {
        Self(value * SOLAR_PER_PC3_TO_KG_PER_M3)
    }

    /// Returns the density in kg/m³.
    pub fn to_kg_per_m3(&self) -> f64 {
        self.0
    }

    /// Converts the density to g/cm³.
    pub fn to_g_per_cm3(&self) -> f64 {
        self.0 / 1e3
    }

    /// Converts the density to M☉/pc³.
    pub fn to_solar_masses_per_pc3(&self) -> f64 {
        self.0 / SOLAR_PER_PC3_TO_KG_PER_M3
    }
}

impl Add for VolumeDensity {
    type Output = VolumeDensity;

    fn add(self, rhs: VolumeDensity) -> VolumeDensity {
        VolumeDensity(self.0 + rhs.0)
    }
}

impl Sub for VolumeDensity {
    type Output = VolumeDensity;

    fn sub(self, rhs: VolumeDensity) -> VolumeDensity {
        VolumeDensity(self.0 - rhs.0)
    }
}

impl Mul<f64> for VolumeDensity {
    type Output = VolumeDensity;

    fn mul(self, rhs: f64) -> VolumeDensity {
        VolumeDensity(self.0 * rhs)
    }
}

impl Div<f64> for VolumeDensity {
    type Output = VolumeDensity;

    fn div(self, rhs: f64) -> VolumeDensity {
        VolumeDensity(self.0 / rhs)
    }
}
