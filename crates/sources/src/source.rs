//! The primary source abstraction.

use rand_chacha::ChaChaRng;
use spectra::WavelengthRange;
use units::Luminosity;

use crate::packet::PhotonPacket;

/// One primary source of photon packets.
///
/// A source is configured once, told the system's wavelength range during
/// setup, given its contiguous history-index range before each emission
/// segment, and then asked to launch packets. `prepare_for_launch` runs
/// serially; `launch` runs from many threads at once and must only read
/// the state frozen by the preparation (per-thread scratch lives in
/// thread-local storage, never behind a lock).
pub trait Source: Send + Sync {
    /// Symmetry dimension of the source's spatial distribution: 1 for
    /// spherical symmetry about the origin, 2 for axial symmetry, 3
    /// otherwise.
    fn dimension(&self) -> u32;

    /// Bolometric luminosity over the configured wavelength range.
    fn luminosity(&self) -> Luminosity;

    /// The configured emission weight w_s used by the bias formula.
    fn emission_weight(&self) -> f64;

    /// Receive the source system's wavelength range during setup. Sources
    /// precompute their spectral state (cumulative distributions,
    /// per-subsource luminosities) here.
    fn set_wavelength_range(&mut self, range: WavelengthRange);

    /// Receive the contiguous history-index range [first, first + count)
    /// assigned to this source for the coming segment, plus an opaque
    /// segment token used to invalidate per-thread caches. Called
    /// serially; may allocate per-subsource structures.
    fn prepare_for_launch(&mut self, first_index: usize, count: usize, segment: u64);

    /// Launch the packet with the given global history index, carrying
    /// the luminosity assigned by the source system (before any
    /// source-local bias corrections). Thread-safe; deterministic as a
    /// function of the history index and the state frozen by
    /// `prepare_for_launch`.
    fn launch(
        &self,
        pp: &mut PhotonPacket,
        history_index: usize,
        luminosity: Luminosity,
        rng: &mut ChaChaRng,
    );
}
