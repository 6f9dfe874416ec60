//! Geometric sources: analytic spatial and spectral distributions.

use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand_chacha::ChaChaRng;
use spectra::{BlackbodySed, SpectralCdf, WavelengthRange};
use units::Luminosity;

use crate::packet::PhotonPacket;
use crate::random::isotropic_direction;
use crate::source::Source;

/// The spatial distribution of a geometric source.
#[derive(Debug, Clone, Copy)]
pub enum SourceGeometry {
    /// All packets depart from one point
    Point(Point3<f64>),
    /// Packets depart uniformly from the interior of a sphere
    UniformSphere { center: Point3<f64>, radius: f64 },
}

impl SourceGeometry {
    fn sample(&self, rng: &mut ChaChaRng) -> Point3<f64> {
        match self {
            SourceGeometry::Point(p) => *p,
            SourceGeometry::UniformSphere { center, radius } => {
                let r = radius * rng.random::<f64>().cbrt();
                let dir = isotropic_direction(rng);
                center + r * dir
            }
        }
    }

    fn center(&self) -> Point3<f64> {
        match self {
            SourceGeometry::Point(p) => *p,
            SourceGeometry::UniformSphere { center, .. } => *center,
        }
    }
}

/// A primary source with an analytic geometry, a blackbody spectrum and a
/// configured bolometric luminosity.
pub struct GeometricSource {
    geometry: SourceGeometry,
    sed: BlackbodySed,
    luminosity: Luminosity,
    emission_weight: f64,
    bulk_velocity: Vector3<f64>,
    cdf: Option<SpectralCdf>,
}

impl GeometricSource {
    pub fn new(
        geometry: SourceGeometry,
        sed: BlackbodySed,
        luminosity: Luminosity,
        emission_weight: f64,
    ) -> Self {
        Self {
            geometry,
            sed,
            luminosity,
            emission_weight,
            bulk_velocity: Vector3::zeros(),
            cdf: None,
        }
    }

    /// Give the whole source a bulk velocity, carried onto its packets.
    pub fn with_bulk_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.bulk_velocity = velocity;
        self
    }
}

impl Source for GeometricSource {
    fn dimension(&self) -> u32 {
        // Spherically symmetric about the origin, or a general 3D point
        if self.geometry.center() == Point3::origin() {
            1
        } else {
            3
        }
    }

    fn luminosity(&self) -> Luminosity {
        self.luminosity
    }

    fn emission_weight(&self) -> f64 {
        self.emission_weight
    }

    fn set_wavelength_range(&mut self, range: WavelengthRange) {
        self.cdf = Some(self.sed.cdf(&range, self.luminosity));
    }

    fn prepare_for_launch(&mut self, _first_index: usize, _count: usize, _segment: u64) {
        // All per-launch state is already frozen by set_wavelength_range
    }

    fn launch(
        &self,
        pp: &mut PhotonPacket,
        history_index: usize,
        luminosity: Luminosity,
        rng: &mut ChaChaRng,
    ) {
        let cdf = self
            .cdf
            .as_ref()
            .expect("source launched before wavelength range was set");

        let wavelength = match cdf.sample(rng) {
            Some(lambda) => lambda,
            None => {
                pp.launch_inactive(history_index);
                return;
            }
        };

        let position = self.geometry.sample(rng);
        let direction = isotropic_direction(rng);
        pp.launch(history_index, wavelength, luminosity, position, direction);
        pp.set_bulk_velocity(self.bulk_velocity);
    }
}
