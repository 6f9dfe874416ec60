//! The primary source system: the launch map and packet routing.
//!
//! One emission segment proceeds in two phases. `prepare_for_launch(n)`
//! runs serially: it recomputes the launch map (relative luminosities,
//! biased launch weights, the history-index prefix map) from the sources'
//! current state and hands each source its contiguous index range. After
//! that, `launch` may be called from any number of threads for any
//! history index in [0, n); it only reads the frozen map.

use log::info;
use serde::{Deserialize, Serialize};
use spectra::WavelengthRange;
use thiserror::Error;
use units::{Length, Luminosity};

use crate::allocation::{allocate_counts, launch_weights, prefix_map};
use crate::packet::PhotonPacket;
use crate::random::packet_rng;
use crate::source::Source;

/// Errors raised while validating a source system configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source list is empty
    #[error("sources must contain at least one primary source")]
    EmptySources,

    /// minWavelength or maxWavelength outside [1 Å, 1 m]
    #[error("wavelength {value_m} m for '{property}' lies outside [1 Å, 1 m]")]
    WavelengthBounds {
        /// Offending property name
        property: &'static str,
        /// Configured value in meters
        value_m: f64,
    },

    /// minWavelength not strictly below maxWavelength
    #[error("minWavelength {min_m} m must lie below maxWavelength {max_m} m")]
    WavelengthOrder {
        /// Configured minimum in meters
        min_m: f64,
        /// Configured maximum in meters
        max_m: f64,
    },

    /// sourceBias outside [0, 1]
    #[error("sourceBias must lie in [0, 1], got {value}")]
    SourceBiasRange {
        /// The configured value
        value: f64,
    },

    /// numPacketsMultiplier outside (0, 1000]
    #[error("numPacketsMultiplier must lie in (0, 1000], got {value}")]
    MultiplierRange {
        /// The configured value
        value: f64,
    },
}

/// User-facing configuration of a source system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSystemConfig {
    /// Shortest wavelength of launched packets
    pub min_wavelength: Length,
    /// Longest wavelength of launched packets
    pub max_wavelength: Length,
    /// Fraction ξ of packets distributed uniformly by emission weight
    pub source_bias: f64,
    /// Multiplier on the packet budget for primary emission segments
    pub num_packets_multiplier: f64,
    /// Base seed for per-packet random state
    pub seed: u64,
}

impl Default for SourceSystemConfig {
    fn default() -> Self {
        Self {
            min_wavelength: Length::from_micron(0.09),
            max_wavelength: Length::from_micron(20.0),
            source_bias: 0.5,
            num_packets_multiplier: 1.0,
            seed: 0,
        }
    }
}

impl SourceSystemConfig {
    fn validate(&self) -> Result<WavelengthRange, ConfigError> {
        let lower = Length::from_angstrom(1.0);
        let upper = Length::from_m(1.0);
        for (property, value) in [
            ("minWavelength", self.min_wavelength),
            ("maxWavelength", self.max_wavelength),
        ] {
            if value < lower || value > upper {
                return Err(ConfigError::WavelengthBounds {
                    property,
                    value_m: value.to_m(),
                });
            }
        }
        if self.min_wavelength >= self.max_wavelength {
            return Err(ConfigError::WavelengthOrder {
                min_m: self.min_wavelength.to_m(),
                max_m: self.max_wavelength.to_m(),
            });
        }
        if !(0.0..=1.0).contains(&self.source_bias) {
            return Err(ConfigError::SourceBiasRange {
                value: self.source_bias,
            });
        }
        if !(self.num_packets_multiplier > 0.0 && self.num_packets_multiplier <= 1000.0) {
            return Err(ConfigError::MultiplierRange {
                value: self.num_packets_multiplier,
            });
        }
        WavelengthRange::new(self.min_wavelength, self.max_wavelength).map_err(|_| {
            ConfigError::WavelengthOrder {
                min_m: self.min_wavelength.to_m(),
                max_m: self.max_wavelength.to_m(),
            }
        })
    }
}

/// A complete primary source system: the superposition of one or more
/// sources, with deterministic distribution of packet launches across
/// them.
pub struct SourceSystem {
    config: SourceSystemConfig,
    range: WavelengthRange,
    sources: Vec<Box<dyn Source>>,

    // The launch map, rebuilt by prepare_for_launch
    total_luminosity: Luminosity,
    relative_luminosity: Vec<f64>,
    launch_weight: Vec<f64>,
    first_index: Vec<usize>,
    packet_luminosity: Luminosity,
    segment: u64,
}

impl SourceSystem {
    /// Validate the configuration and forward the wavelength range to
    /// every source.
    pub fn new(
        config: SourceSystemConfig,
        mut sources: Vec<Box<dyn Source>>,
    ) -> Result<Self, ConfigError> {
        if sources.is_empty() {
            return Err(ConfigError::EmptySources);
        }
        let range = config.validate()?;
        for source in sources.iter_mut() {
            source.set_wavelength_range(range);
        }

        let num_sources = sources.len();
        Ok(Self {
            config,
            range,
            sources,
            total_luminosity: Luminosity::zero(),
            relative_luminosity: vec![0.0; num_sources],
            launch_weight: vec![0.0; num_sources],
            first_index: vec![0; num_sources + 1],
            packet_luminosity: Luminosity::zero(),
            segment: 0,
        })
    }

    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    /// The wavelength range configured for this source system.
    pub fn wavelength_range(&self) -> WavelengthRange {
        self.range
    }

    /// Dimension of the source system: that of its least symmetric
    /// component.
    pub fn dimension(&self) -> u32 {
        self.sources
            .iter()
            .map(|s| s.dimension())
            .max()
            .unwrap_or(1)
    }

    /// Bolometric luminosity of the whole system: the sum over sources,
    /// in source order.
    pub fn luminosity(&self) -> Luminosity {
        self.sources
            .iter()
            .map(|s| s.luminosity())
            .fold(Luminosity::zero(), |acc, l| acc + l)
    }

    /// The packet budget for one emission segment: the configured base
    /// count times this system's multiplier.
    pub fn num_packets(&self, base: usize) -> usize {
        (base as f64 * self.config.num_packets_multiplier).round() as usize
    }

    /// First history index assigned to each source, with the sentinel
    /// total at the end.
    pub fn first_indices(&self) -> &[usize] {
        &self.first_index
    }

    /// Relative launch weight of each source after renormalization.
    pub fn launch_weights(&self) -> &[f64] {
        &self.launch_weight
    }

    /// Average luminosity carried per packet in the current segment.
    pub fn packet_luminosity(&self) -> Luminosity {
        self.packet_luminosity
    }

    /// Build the launch map for a segment of `n` packets and hand every
    /// source its index range. Called serially; afterwards `launch` is
    /// thread-safe for all indices in [0, n).
    pub fn prepare_for_launch(&mut self, n: usize) {
        let luminosities: Vec<f64> = self
            .sources
            .iter()
            .map(|s| s.luminosity().to_watts())
            .collect();
        let weights: Vec<f64> = self.sources.iter().map(|s| s.emission_weight()).collect();

        let total: f64 = luminosities.iter().sum();
        self.total_luminosity = Luminosity::from_watts(total);
        self.relative_luminosity = if total > 0.0 {
            luminosities.iter().map(|l| l / total).collect()
        } else {
            vec![0.0; luminosities.len()]
        };
        self.launch_weight = launch_weights(&luminosities, &weights, self.config.source_bias);

        // Sources are allocated packets whenever the launch weights carry
        // any probability at all; with zero total luminosity those packets
        // launch inactive, but they still occupy their history indices.
        let weight_total: f64 = self.launch_weight.iter().sum();
        let counts = if weight_total > 0.0 {
            allocate_counts(&self.launch_weight, n)
        } else {
            vec![0; luminosities.len()]
        };
        self.first_index = prefix_map(&counts);
        self.packet_luminosity = if n > 0 {
            self.total_luminosity / n as f64
        } else {
            Luminosity::zero()
        };

        self.segment += 1;
        let segment_token = self.config.seed ^ self.segment.rotate_left(17);
        for (index, source) in self.sources.iter_mut().enumerate() {
            source.prepare_for_launch(self.first_index[index], counts[index], segment_token);
        }

        info!(
            "Prepared segment {}: {} packets across {} sources, L = {:.6e} W",
            self.segment,
            n,
            self.sources.len(),
            total
        );
    }

    /// Launch the packet with the given history index from its owning
    /// source, fully (re)initializing the packet. Thread-safe after
    /// `prepare_for_launch`.
    pub fn launch(&self, pp: &mut PhotonPacket, history_index: usize) {
        let total_assigned = *self.first_index.last().unwrap_or(&0);
        if history_index >= total_assigned {
            pp.launch_inactive(history_index);
            return;
        }

        // The owning source: the last s with first_index[s] <= h
        let source_index = self
            .first_index
            .partition_point(|&first| first <= history_index)
            - 1;

        let weight = self.launch_weight[source_index];
        let relative = self.relative_luminosity[source_index];
        if weight <= 0.0 || relative <= 0.0 {
            pp.launch_inactive(history_index);
            pp.set_source_index(source_index);
            return;
        }

        let luminosity = self.packet_luminosity * (relative / weight);
        let mut rng = packet_rng(self.config.seed, history_index);
        self.sources[source_index].launch(pp, history_index, luminosity, &mut rng);
        pp.set_source_index(source_index);
    }
}
