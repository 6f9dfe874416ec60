use serde::{Deserialize, Serialize};
use units::Length;

use crate::error::{SedError, SedResult};

/// A closed wavelength interval [min, max].
///
/// Source systems, SED families and spectral distributions all operate on a
/// configured wavelength range; intersections of the configured range with a
/// table's intrinsic range decide which part of a spectrum contributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavelengthRange {
    min: Length,
    max: Length,
}

impl WavelengthRange {
    /// Create a range after checking that 0 < min < max.
    pub fn new(min: Length, max: Length) -> SedResult<Self> {
        if min.to_m() <= 0.0 || min >= max {
            return Err(SedError::InvalidRange {
                min_m: min.to_m(),
                max_m: max.to_m(),
            });
        }
        Ok(Self { min, max })
    }

    /// Shortest wavelength in the range.
    pub fn min(&self) -> Length {
        self.min
    }

    /// Longest wavelength in the range.
    pub fn max(&self) -> Length {
        self.max
    }

    /// True when the wavelength lies inside the closed interval.
    pub fn contains(&self, wavelength: Length) -> bool {
        wavelength >= self.min && wavelength <= self.max
    }

    /// Intersection with another range, or None when they are disjoint.
    pub fn intersect(&self, other: &WavelengthRange) -> Option<WavelengthRange> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min < max).then_some(WavelengthRange { min, max })
    }

    /// Clamp a wavelength into the closed interval.
    pub fn clamp(&self, wavelength: Length) -> Length {
        wavelength.max(self.min).min(self.max)
    }
}
