//! Launch a small emission segment from two stars and summarize the
//! packet stream.
//!
//! Usage: cargo run -p transfer --example launch_demo

use nalgebra::Point3;
use spectra::BlackbodySed;
use units::{Luminosity, Temperature};

use sources::{GeometricSource, Source, SourceGeometry, SourceSystem, SourceSystemConfig};
use transfer::{launch_all, SegmentConfig};

fn main() {
    env_logger::init();

    let sources: Vec<Box<dyn Source>> = vec![
        Box::new(GeometricSource::new(
            SourceGeometry::Point(Point3::origin()),
            BlackbodySed::new(Temperature::from_kelvin(5772.0)),
            Luminosity::from_solar_luminosities(1.0),
            1.0,
        )),
        Box::new(GeometricSource::new(
            SourceGeometry::UniformSphere {
                center: Point3::new(3.086e16, 0.0, 0.0),
                radius: 1e15,
            },
            BlackbodySed::new(Temperature::from_kelvin(25000.0)),
            Luminosity::from_solar_luminosities(1e4),
            1.0,
        )),
    ];

    let mut system = SourceSystem::new(SourceSystemConfig::default(), sources).unwrap();
    println!(
        "Source system: {} sources, L = {:.4e} W, dimension {}",
        system.num_sources(),
        system.luminosity().to_watts(),
        system.dimension()
    );

    let packets = launch_all(&mut system, &SegmentConfig::new(100_000));

    let active = packets.iter().filter(|pp| pp.is_active()).count();
    let total_weight: f64 = packets.iter().map(|pp| pp.luminosity().to_watts()).sum();
    let mean_wavelength: f64 = packets
        .iter()
        .filter(|pp| pp.is_active())
        .map(|pp| pp.wavelength().to_micron())
        .sum::<f64>()
        / active as f64;

    println!("Launched {} packets ({} active)", packets.len(), active);
    println!("Summed packet weight: {:.4e} W", total_weight);
    println!("Mean wavelength: {:.3} micron", mean_wavelength);

    for index in [0usize, 1, 2] {
        let pp = &packets[index];
        println!(
            "  history {}: source {}, {:.3} micron, {:.3e} W",
            pp.history_index(),
            pp.source_index(),
            pp.wavelength().to_micron(),
            pp.luminosity().to_watts()
        );
    }
}
