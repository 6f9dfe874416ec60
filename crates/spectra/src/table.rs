//! Tabulated specific luminosity on (wavelength, logU, Z) axes.

use units::Length;

use crate::cdf::SpectralCdf;
use crate::error::{SedError, SedResult};
use crate::range::WavelengthRange;

/// A precomputed specific-luminosity table on axes (λ, logU, Z).
///
/// Values are stored in a flat array indexed `[iλ][iU][iZ]`, interpolated
/// linearly along each axis. Query points outside an axis range are clamped
/// to the axis bounds.
#[derive(Debug, Clone)]
pub struct SedTable {
    lambdav: Vec<f64>, // m, strictly increasing
    log_uv: Vec<f64>,  // strictly increasing
    zv: Vec<f64>,      // strictly increasing
    lv: Vec<f64>,      // W/m, len = lambdav.len() * log_uv.len() * zv.len()
}

impl SedTable {
    /// Build a table from its axis grids and flat value array.
    pub fn new(
        lambdav: Vec<f64>,
        log_uv: Vec<f64>,
        zv: Vec<f64>,
        lv: Vec<f64>,
    ) -> SedResult<Self> {
        check_axis("lambda", &lambdav, 2)?;
        check_axis("logU", &log_uv, 1)?;
        check_axis("Z", &zv, 1)?;

        if lambdav[0] <= 0.0 {
            return Err(SedError::InvalidRange {
                min_m: lambdav[0],
                max_m: *lambdav.last().unwrap(),
            });
        }

        let expected = lambdav.len() * log_uv.len() * zv.len();
        if lv.len() != expected {
            return Err(SedError::ShapeMismatch {
                expected,
                got: lv.len(),
            });
        }

        Ok(Self {
            lambdav,
            log_uv,
            zv,
            lv,
        })
    }

    /// The wavelength interval covered by the λ axis.
    pub fn axis_range(&self) -> WavelengthRange {
        WavelengthRange::new(
            Length::from_m(self.lambdav[0]),
            Length::from_m(*self.lambdav.last().unwrap()),
        )
        .expect("table axis is strictly increasing")
    }

    /// Specific luminosity (W/m) at the query point, linear in all axes.
    pub fn value(&self, wavelength: Length, log_u: f64, z: f64) -> f64 {
        let (il, tl) = bracket(&self.lambdav, wavelength.to_m());
        let (iu, tu) = bracket(&self.log_uv, log_u);
        let (iz, tz) = bracket(&self.zv, z);

        let mut acc = 0.0;
        for (dl, wl) in [(0, 1.0 - tl), (1, tl)] {
            for (du, wu) in [(0, 1.0 - tu), (1, tu)] {
                for (dz, wz) in [(0, 1.0 - tz), (1, tz)] {
                    let w = wl * wu * wz;
                    if w > 0.0 {
                        acc += w * self.at(il + dl, iu + du, iz + dz);
                    }
                }
            }
        }
        acc
    }

    /// Build the cumulative spectral distribution of the table spectrum at
    /// (logU, Z) over the intersection of the requested range with the λ
    /// axis. A disjoint range yields the zero distribution.
    pub fn cdf(&self, range: &WavelengthRange, log_u: f64, z: f64) -> SpectralCdf {
        let effective = match range.intersect(&self.axis_range()) {
            Some(r) => r,
            None => return SpectralCdf::zero(),
        };
        let lo = effective.min().to_m();
        let hi = effective.max().to_m();

        // Grid points strictly inside the effective range, with the range
        // endpoints added so the integral covers exactly [lo, hi].
        let mut grid = Vec::with_capacity(self.lambdav.len() + 2);
        grid.push(lo);
        grid.extend(self.lambdav.iter().copied().filter(|&l| l > lo && l < hi));
        grid.push(hi);

        let lv: Vec<f64> = grid
            .iter()
            .map(|&l| self.value(Length::from_m(l), log_u, z))
            .collect();

        SpectralCdf::from_samples(grid, lv)
    }

    fn at(&self, il: usize, iu: usize, iz: usize) -> f64 {
        let il = il.min(self.lambdav.len() - 1);
        let iu = iu.min(self.log_uv.len() - 1);
        let iz = iz.min(self.zv.len() - 1);
        self.lv[(il * self.log_uv.len() + iu) * self.zv.len() + iz]
    }
}

/// Bracketing index and interpolation parameter on a sorted grid.
///
/// Out-of-range queries clamp to the axis bounds: t = 0 at or below the
/// first point, t = 1 at or beyond the last interval.
fn bracket(axis: &[f64], x: f64) -> (usize, f64) {
    if axis.len() == 1 || x <= axis[0] {
        return (0, 0.0);
    }
    let last = axis.len() - 1;
    if x >= axis[last] {
        return (last - 1, 1.0);
    }
    let hi = axis.partition_point(|&a| a < x).max(1);
    let lo = hi - 1;
    let t = (x - axis[lo]) / (axis[hi] - axis[lo]);
    (lo, t)
}

fn check_axis(name: &'static str, axis: &[f64], need: usize) -> SedResult<()> {
    if axis.len() < need {
        return Err(SedError::AxisTooShort {
            axis: name,
            need,
            got: axis.len(),
        });
    }
    if axis.windows(2).any(|w| w[0] >= w[1]) {
        return Err(SedError::NonMonotonicAxis { axis: name });
    }
    Ok(())
}
