//! Emission-segment driver.
//!
//! Runs one primary emission segment in the two phases the source system
//! expects: a serial `prepare_for_launch` with the full packet budget,
//! then parallel launches over chunks of consecutive history indices.
//! Because every packet's state derives only from its history index and
//! the frozen launch map, the packet stream is identical for identical
//! configurations no matter how rayon schedules the chunks.

use log::info;
use rayon::prelude::*;
use sources::{PhotonPacket, SourceSystem};

/// Configuration of one emission segment.
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Base packet budget, multiplied by the source system's
    /// numPacketsMultiplier to obtain the segment size N
    pub num_packets: usize,
    /// Consecutive history indices handled by one worker at a time
    pub chunk_size: usize,
}

impl SegmentConfig {
    pub fn new(num_packets: usize) -> Self {
        Self {
            num_packets,
            chunk_size: 1024,
        }
    }
}

/// Run one emission segment, feeding every launched packet to the
/// consumer. Packets arrive in arbitrary chunk order but with
/// consecutive history indices inside each chunk. Returns the number of
/// packets launched.
pub fn run_segment<F>(system: &mut SourceSystem, config: &SegmentConfig, consumer: F) -> usize
where
    F: Fn(&PhotonPacket) + Send + Sync,
{
    let n = system.num_packets(config.num_packets);
    system.prepare_for_launch(n);

    let system: &SourceSystem = system;
    let chunk = config.chunk_size.max(1);
    let starts: Vec<usize> = (0..n).step_by(chunk).collect();

    starts.par_iter().for_each(|&start| {
        let end = (start + chunk).min(n);
        let mut pp = PhotonPacket::new();
        for history_index in start..end {
            system.launch(&mut pp, history_index);
            consumer(&pp);
        }
    });

    info!("Launched {} packets in {} chunks", n, starts.len());
    n
}

/// Run one emission segment and collect the packets in history-index
/// order.
pub fn launch_all(system: &mut SourceSystem, config: &SegmentConfig) -> Vec<PhotonPacket> {
    let n = system.num_packets(config.num_packets);
    system.prepare_for_launch(n);

    let system: &SourceSystem = system;
    let chunk = config.chunk_size.max(1);
    let mut packets = vec![PhotonPacket::new(); n];

    packets
        .par_chunks_mut(chunk)
        .enumerate()
        .for_each(|(chunk_index, slice)| {
            for (offset, slot) in slice.iter_mut().enumerate() {
                system.launch(slot, chunk_index * chunk + offset);
            }
        });

    packets
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use spectra::BlackbodySed;
    use units::{Luminosity, Temperature};

    use sources::{GeometricSource, Source, SourceGeometry, SourceSystem, SourceSystemConfig};

    use super::*;

    fn test_system() -> SourceSystem {
        let sources: Vec<Box<dyn Source>> = vec![
            Box::new(GeometricSource::new(
                SourceGeometry::Point(Point3::origin()),
                BlackbodySed::new(Temperature::from_kelvin(5772.0)),
                Luminosity::from_watts(1.0),
                1.0,
            )),
            Box::new(GeometricSource::new(
                SourceGeometry::Point(Point3::new(1.0, 0.0, 0.0)),
                BlackbodySed::new(Temperature::from_kelvin(20000.0)),
                Luminosity::from_watts(3.0),
                1.0,
            )),
        ];
        SourceSystem::new(SourceSystemConfig::default(), sources).unwrap()
    }

    #[test]
    fn every_history_index_is_launched_exactly_once() {
        let mut system = test_system();
        let counter = AtomicUsize::new(0);

        let n = run_segment(&mut system, &SegmentConfig::new(5000), |pp| {
            assert!(pp.history_index() < 5000);
            counter.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(n, 5000);
        assert_eq!(counter.load(Ordering::Relaxed), 5000);
    }

    #[test]
    fn chunk_size_does_not_change_the_packet_stream() {
        let reference = {
            let mut system = test_system();
            launch_all(&mut system, &SegmentConfig::new(2000))
        };

        for chunk_size in [1, 7, 64, 5000] {
            let mut system = test_system();
            let mut config = SegmentConfig::new(2000);
            config.chunk_size = chunk_size;
            let packets = launch_all(&mut system, &config);

            assert_eq!(packets.len(), reference.len());
            for (a, b) in packets.iter().zip(reference.iter()) {
                assert_eq!(a, b, "chunk size {}", chunk_size);
            }
        }
    }

    #[test]
    fn collected_weights_recover_the_total_luminosity() {
        let mut system = test_system();
        let total = Mutex::new(0.0f64);

        run_segment(&mut system, &SegmentConfig::new(1000), |pp| {
            *total.lock().unwrap() += pp.luminosity().to_watts();
        });

        assert_relative_eq!(*total.lock().unwrap(), 4.0, max_relative = 1e-2);
    }

    #[test]
    fn the_multiplier_scales_the_segment() {
        let config = SourceSystemConfig {
            num_packets_multiplier: 0.5,
            ..SourceSystemConfig::default()
        };
        let sources: Vec<Box<dyn Source>> = vec![Box::new(GeometricSource::new(
            SourceGeometry::Point(Point3::origin()),
            BlackbodySed::new(Temperature::from_kelvin(5772.0)),
            Luminosity::from_watts(1.0),
            1.0,
        ))];
        let mut system = SourceSystem::new(config, sources).unwrap();

        let packets = launch_all(&mut system, &SegmentConfig::new(1000));
        assert_eq!(packets.len(), 500);
    }

    #[test]
    fn an_empty_segment_launches_nothing() {
        let mut system = test_system();
        let packets = launch_all(&mut system, &SegmentConfig::new(0));
        assert!(packets.is_empty());
    }
}
