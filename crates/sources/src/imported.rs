//! Sources imported from a snapshot: many subsources, launched in
//! index order with cached per-subsource spectral state.

use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;
use rand_chacha::ChaChaRng;
use snapshot::Snapshot;
use spectra::{SedFamily, SpectralCdf, WavelengthRange};
use units::{Length, Luminosity};

use crate::allocation::{allocate_counts, launch_weights, prefix_map};
use crate::packet::PhotonPacket;
use crate::random::isotropic_direction;
use crate::source::Source;

/// One cached subsource: the spectral distribution of the subsource the
/// calling thread is currently launching from.
struct CacheEntry {
    subsource: usize,
    cdf: SpectralCdf,
}

/// Per-thread registry of subsource caches, keyed by the owning source's
/// first history index (unique among launchable sources in a segment).
/// All entries are dropped the first time a thread sees a new segment
/// token, so the caches of a finished segment never outlive the next one.
struct CacheRegistry {
    segment: u64,
    entries: HashMap<usize, CacheEntry>,
}

thread_local! {
    static SUBSOURCE_CACHES: RefCell<CacheRegistry> = RefCell::new(CacheRegistry {
        segment: 0,
        entries: HashMap::new(),
    });
}

/// A primary source whose subsources are the entities of an imported
/// snapshot, each with its own SED family parameters.
///
/// Before each segment the assigned history-index range is partitioned
/// over the subsources with the same biased formula the source system
/// applies to its sources, with unit subsource weights. Launching walks
/// the subsources in index order; the spectral distribution of the
/// current subsource is built lazily in thread-local storage and replaced
/// when the thread's local index advances past it.
pub struct ImportedSource {
    snapshot: Snapshot,
    sed_family: Box<dyn SedFamily>,
    emission_weight: f64,
    subsource_bias: f64,

    range: Option<WavelengthRange>,
    sub_luminosities: Vec<f64>,
    total_luminosity: Luminosity,

    first_index: usize,
    count: usize,
    segment: u64,
    sub_first: Vec<usize>,
    sub_lv: Vec<f64>,
    sub_wv: Vec<f64>,
}

impl ImportedSource {
    /// Wrap a fully read snapshot and an SED family. The snapshot must
    /// have been opened with the family's parameter columns enabled.
    pub fn new(snapshot: Snapshot, sed_family: Box<dyn SedFamily>, emission_weight: f64) -> Self {
        Self {
            snapshot,
            sed_family,
            emission_weight,
            subsource_bias: 0.5,
            range: None,
            sub_luminosities: Vec::new(),
            total_luminosity: Luminosity::zero(),
            first_index: 0,
            count: 0,
            segment: 0,
            sub_first: Vec::new(),
            sub_lv: Vec::new(),
            sub_wv: Vec::new(),
        }
    }

    /// Fraction of this source's packets distributed uniformly across
    /// subsources rather than proportionally to their luminosities.
    pub fn with_subsource_bias(mut self, bias: f64) -> Self {
        self.subsource_bias = bias;
        self
    }

    pub fn num_subsources(&self) -> usize {
        self.snapshot.num_entities()
    }

    fn build_cdf(&self, subsource: usize) -> SpectralCdf {
        let range = self
            .range
            .as_ref()
            .expect("source launched before wavelength range was set");
        self.sed_family
            .cdf(range, self.snapshot.parameters_of(subsource))
    }

    /// Sample a wavelength from the subsource's spectral distribution,
    /// building or replacing this thread's cache entry as needed.
    fn sample_wavelength(&self, subsource: usize, rng: &mut ChaChaRng) -> Option<Length> {
        SUBSOURCE_CACHES.with(|registry| {
            let mut registry = registry.borrow_mut();
            if registry.segment != self.segment {
                registry.entries.clear();
                registry.segment = self.segment;
            }

            let entry = registry
                .entries
                .entry(self.first_index)
                .and_modify(|e| {
                    if e.subsource != subsource {
                        *e = CacheEntry {
                            subsource,
                            cdf: self.build_cdf(subsource),
                        };
                    }
                })
                .or_insert_with(|| CacheEntry {
                    subsource,
                    cdf: self.build_cdf(subsource),
                });
            entry.cdf.sample(rng)
        })
    }
}

impl Source for ImportedSource {
    fn dimension(&self) -> u32 {
        3
    }

    fn luminosity(&self) -> Luminosity {
        self.total_luminosity
    }

    fn emission_weight(&self) -> f64 {
        self.emission_weight
    }

    fn set_wavelength_range(&mut self, range: WavelengthRange) {
        // Bolometric luminosity of every subsource over the range; the
        // distributions themselves are rebuilt lazily during launching
        let luminosities: Vec<f64> = (0..self.snapshot.num_entities())
            .map(|m| {
                self.sed_family
                    .cdf(&range, self.snapshot.parameters_of(m))
                    .luminosity()
                    .to_watts()
            })
            .collect();
        self.total_luminosity = Luminosity::from_watts(luminosities.iter().sum());
        self.sub_luminosities = luminosities;
        self.range = Some(range);
    }

    fn prepare_for_launch(&mut self, first_index: usize, count: usize, segment: u64) {
        self.first_index = first_index;
        self.count = count;
        self.segment = segment;

        let n = self.sub_luminosities.len();
        let total: f64 = self.sub_luminosities.iter().sum();
        self.sub_lv = if total > 0.0 {
            self.sub_luminosities.iter().map(|l| l / total).collect()
        } else {
            vec![0.0; n]
        };
        self.sub_wv = launch_weights(&self.sub_luminosities, &vec![1.0; n], self.subsource_bias);

        let counts = if total > 0.0 {
            allocate_counts(&self.sub_wv, count)
        } else {
            vec![0; n]
        };
        self.sub_first = prefix_map(&counts);
    }

    fn launch(
        &self,
        pp: &mut PhotonPacket,
        history_index: usize,
        luminosity: Luminosity,
        rng: &mut ChaChaRng,
    ) {
        let local_index = history_index - self.first_index;
        if self.count == 0 || self.sub_first.last() == Some(&0) {
            pp.launch_inactive(history_index);
            return;
        }

        // The owning subsource, by binary search on the local prefix map
        let m = (self.sub_first.partition_point(|&i| i <= local_index) - 1)
            .min(self.sub_lv.len() - 1);

        let ratio = if self.sub_wv[m] > 0.0 && self.sub_lv[m] > 0.0 {
            self.sub_lv[m] / self.sub_wv[m]
        } else {
            0.0
        };
        if ratio == 0.0 {
            pp.launch_inactive(history_index);
            return;
        }

        let wavelength = match self.sample_wavelength(m, rng) {
            Some(lambda) => lambda,
            None => {
                pp.launch_inactive(history_index);
                return;
            }
        };

        let position = match self.snapshot.generate_position_in(m, rng) {
            Some(p) => p,
            None => {
                warn!(
                    "Interior sampling failed for subsource {}; launching history {} inactive",
                    m, history_index
                );
                pp.launch_inactive(history_index);
                return;
            }
        };

        let direction = isotropic_direction(rng);
        pp.launch(
            history_index,
            wavelength,
            luminosity * ratio,
            position,
            direction,
        );
        pp.set_bulk_velocity(self.snapshot.velocity_of(m));
    }
}
