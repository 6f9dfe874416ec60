mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use spectra::BlackbodySed;
    use units::{Luminosity, Temperature};

    use crate::geometric::{GeometricSource, SourceGeometry};
    use crate::packet::PhotonPacket;
    use crate::source::Source;
    use crate::system::{SourceSystem, SourceSystemConfig};

    fn solar_point_source() -> Box<dyn Source> {
        Box::new(GeometricSource::new(
            SourceGeometry::Point(Point3::origin()),
            BlackbodySed::new(Temperature::from_kelvin(5772.0)),
            Luminosity::from_solar_luminosities(1.0),
            1.0,
        ))
    }

    fn prepared_system(sources: Vec<Box<dyn Source>>, n: usize) -> SourceSystem {
        let mut system = SourceSystem::new(SourceSystemConfig::default(), sources).unwrap();
        system.prepare_for_launch(n);
        system
    }

    #[test]
    fn point_source_at_the_origin_is_spherically_symmetric() {
        let system = prepared_system(vec![solar_point_source()], 10);
        assert_eq!(system.dimension(), 1);
    }

    #[test]
    fn off_origin_sphere_is_a_general_3d_source() {
        let source = GeometricSource::new(
            SourceGeometry::UniformSphere {
                center: Point3::new(1.0, 0.0, 0.0),
                radius: 0.5,
            },
            BlackbodySed::new(Temperature::from_kelvin(10000.0)),
            Luminosity::from_watts(1.0),
            1.0,
        );
        assert_eq!(source.dimension(), 3);
    }

    #[test]
    fn packets_carry_in_range_wavelengths_and_unit_directions() {
        let system = prepared_system(vec![solar_point_source()], 500);
        let range = system.wavelength_range();

        let mut pp = PhotonPacket::new();
        for h in 0..500 {
            system.launch(&mut pp, h);
            assert!(pp.is_active());
            assert!(range.contains(pp.wavelength()), "history {}", h);
            assert_relative_eq!(pp.direction().norm(), 1.0, max_relative = 1e-12);
            assert_eq!(pp.position(), Point3::origin());
            assert_eq!(pp.stokes().linear_degree(), 0.0);
        }
    }

    #[test]
    fn packet_weights_sum_to_the_luminosity() {
        let n = 1000;
        let system = prepared_system(vec![solar_point_source()], n);

        let mut pp = PhotonPacket::new();
        let total: f64 = (0..n)
            .map(|h| {
                system.launch(&mut pp, h);
                pp.luminosity().to_watts()
            })
            .sum();

        assert_relative_eq!(
            total,
            Luminosity::from_solar_luminosities(1.0).to_watts(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn sphere_source_samples_its_interior() {
        let center = Point3::new(2.0, -1.0, 0.5);
        let radius = 0.25;
        let source = GeometricSource::new(
            SourceGeometry::UniformSphere { center, radius },
            BlackbodySed::new(Temperature::from_kelvin(8000.0)),
            Luminosity::from_watts(1.0),
            1.0,
        );
        let system = prepared_system(vec![Box::new(source)], 200);

        let mut pp = PhotonPacket::new();
        for h in 0..200 {
            system.launch(&mut pp, h);
            let distance = (pp.position() - center).norm();
            assert!(distance <= radius, "history {} at {:?}", h, pp.position());
        }
    }

    #[test]
    fn bulk_velocity_is_carried_onto_packets() {
        let velocity = Vector3::new(1e4, 0.0, -2e4);
        let source = GeometricSource::new(
            SourceGeometry::Point(Point3::origin()),
            BlackbodySed::new(Temperature::from_kelvin(5772.0)),
            Luminosity::from_watts(1.0),
            1.0,
        )
        .with_bulk_velocity(velocity);
        let system = prepared_system(vec![Box::new(source)], 10);

        let mut pp = PhotonPacket::new();
        system.launch(&mut pp, 3);
        assert_eq!(pp.bulk_velocity(), velocity);
    }

    #[test]
    fn cold_source_launches_inactive_packets() {
        let source = GeometricSource::new(
            SourceGeometry::Point(Point3::origin()),
            BlackbodySed::new(Temperature::zero()),
            Luminosity::from_watts(1.0),
            1.0,
        );
        let system = prepared_system(vec![Box::new(source)], 10);

        let mut pp = PhotonPacket::new();
        system.launch(&mut pp, 0);
        assert!(!pp.is_active());
    }

    #[test]
    fn launches_are_deterministic_per_history_index() {
        let system = prepared_system(vec![solar_point_source()], 100);

        let mut pp1 = PhotonPacket::new();
        let mut pp2 = PhotonPacket::new();
        for h in [0, 1, 42, 99] {
            system.launch(&mut pp1, h);
            system.launch(&mut pp2, h);
            assert_eq!(pp1, pp2);
        }

        // Different histories draw different wavelengths
        system.launch(&mut pp1, 0);
        system.launch(&mut pp2, 1);
        assert_ne!(pp1.wavelength(), pp2.wavelength());
    }
}
