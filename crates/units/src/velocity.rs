use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Speed of light in m/s
pub const SPEED_OF_LIGHT: f64 = 2.99792458e8;

/// A physical velocity magnitude using f64 precision.
///
/// Base unit is m/s. Bulk velocity vectors on photon packets and snapshot
/// entities are stored as raw `f64` components in m/s; this newtype is used
/// where a scalar speed crosses an API boundary (import columns, Doppler
/// bookkeeping).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: m/s

impl Velocity {
    /// Creates a zero velocity value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Velocity` from a value in m/s.
    pub fn from_m_per_s(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Velocity` from a value in km/s.
    pub fn from_km_per_s(value: f64) -> Self {
        Self(value * 1e3)
    }

    /// Returns the velocity in m/s.
    pub fn to_m_per_s(&self) -> f64 {
        self.0
    }

    /// Converts the velocity to km/s.
    pub fn to_km_per_s(&self) -> f64 {
        self.0 / 1e3
    }

    /// Ratio to the speed of light (β)
    pub fn beta(&self) -> f64 {
        self.0 / SPEED_OF_LIGHT
    }
}

impl Add for Velocity {
    type Output = Velocity;

    fn add(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 + rhs.0)
    }
}

impl Sub for Velocity {
    type Output = Velocity;

    fn sub(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 - rhs.0)
    }
}

impl Mul<f64> for Velocity {
    type Output = Velocity;

    fn mul(self, rhs: f64) -> Velocity {
        Velocity(self.0 * rhs)
    }
}

impl Div<f64> for Velocity {
    type Output = Velocity;

    fn div(self, rhs: f64) -> Velocity {
        Velocity(self.0 / rhs)
    }
}
