//! Photon packets: the quanta of the Monte Carlo simulation.

use nalgebra::{Point3, Vector3};
use units::{Length, Luminosity};

/// Polarization state as a Stokes 4-vector (I, Q, U, V), normalized so
/// I = 1 for an active packet. Packets launch unpolarized; scattering
/// events in the propagation engine rotate and mix the components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StokesVector {
    pub i: f64,
    pub q: f64,
    pub u: f64,
    pub v: f64,
}

impl StokesVector {
    /// The unpolarized state (1, 0, 0, 0).
    pub fn unpolarized() -> Self {
        Self {
            i: 1.0,
            q: 0.0,
            u: 0.0,
            v: 0.0,
        }
    }

    /// Degree of linear polarization √(Q² + U²) / I.
    pub fn linear_degree(&self) -> f64 {
        if self.i > 0.0 {
            (self.q * self.q + self.u * self.u).sqrt() / self.i
        } else {
            0.0
        }
    }
}

impl Default for StokesVector {
    fn default() -> Self {
        Self::unpolarized()
    }
}

/// A photon packet: a statistical bundle of photons at one wavelength.
///
/// The launch subsystem fully (re)initializes every field; a packet value
/// can therefore be reused across histories. The luminosity field is the
/// packet's weight in watts; an inactive packet (zero weight) is skipped
/// by the propagation engine but still occupies its history index.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotonPacket {
    position: Point3<f64>,
    direction: Vector3<f64>,
    wavelength: Length,
    luminosity: Luminosity,
    stokes: StokesVector,
    history_index: usize,
    source_index: usize,
    bulk_velocity: Vector3<f64>,
}

impl PhotonPacket {
    /// A placeholder packet, overwritten by the first launch.
    pub fn new() -> Self {
        Self {
            position: Point3::origin(),
            direction: Vector3::new(0.0, 0.0, 1.0),
            wavelength: Length::from_m(1.0),
            luminosity: Luminosity::zero(),
            stokes: StokesVector::unpolarized(),
            history_index: 0,
            source_index: 0,
            bulk_velocity: Vector3::zeros(),
        }
    }

    /// Initialize the packet for a new history. Resets the polarization
    /// state to unpolarized and the bulk velocity to zero; the launching
    /// source overrides those afterwards where applicable.
    pub fn launch(
        &mut self,
        history_index: usize,
        wavelength: Length,
        luminosity: Luminosity,
        position: Point3<f64>,
        direction: Vector3<f64>,
    ) {
        self.history_index = history_index;
        self.wavelength = wavelength;
        self.luminosity = luminosity;
        self.position = position;
        self.direction = direction;
        self.stokes = StokesVector::unpolarized();
        self.source_index = 0;
        self.bulk_velocity = Vector3::zeros();
    }

    /// Initialize the packet as inactive: zero weight, to be skipped by
    /// the propagation engine.
    pub fn launch_inactive(&mut self, history_index: usize) {
        self.launch(
            history_index,
            Length::from_m(1.0),
            Luminosity::zero(),
            Point3::origin(),
            Vector3::new(0.0, 0.0, 1.0),
        );
    }

    /// Record the index of the originating source.
    pub fn set_source_index(&mut self, index: usize) {
        self.source_index = index;
    }

    /// Record the bulk velocity of the emitting material.
    pub fn set_bulk_velocity(&mut self, velocity: Vector3<f64>) {
        self.bulk_velocity = velocity;
    }

    /// True when the packet carries weight; inactive packets are skipped.
    pub fn is_active(&self) -> bool {
        self.luminosity.is_positive()
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Unit propagation direction.
    pub fn direction(&self) -> Vector3<f64> {
        self.direction
    }

    pub fn wavelength(&self) -> Length {
        self.wavelength
    }

    /// The packet weight: its share of the source system's luminosity,
    /// including all bias corrections.
    pub fn luminosity(&self) -> Luminosity {
        self.luminosity
    }

    pub fn stokes(&self) -> StokesVector {
        self.stokes
    }

    pub fn history_index(&self) -> usize {
        self.history_index
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn bulk_velocity(&self) -> Vector3<f64> {
        self.bulk_velocity
    }
}

impl Default for PhotonPacket {
    fn default() -> Self {
        Self::new()
    }
}
