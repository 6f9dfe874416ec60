mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;
    use units::length::PC_TO_M;
    use units::mass::SOLAR_MASS_KG;

    use crate::columns::TextColumnFile;
    use crate::geometry::Box3;
    use crate::snapshot::{MassDensityPolicy, Snapshot, ValueKind};

    /// Two Voronoi cells in a [-1, 1]³ pc cube, each 1 M☉, with
    /// metallicity and temperature columns.
    fn two_cell_voronoi(policy: MassDensityPolicy) -> Snapshot {
        let text = "\
-0.5 0 0 1 0.01 100
0.5 0 0 1 0.02 20000
";
        let file = TextColumnFile::from_string("cells.txt", text);
        let mut snapshot =
            Snapshot::open_voronoi(file, Box3::cube(PC_TO_M), ValueKind::Mass).unwrap();
        snapshot.import_metallicity();
        snapshot.import_temperature();
        snapshot.set_mass_density_policy(policy);
        snapshot.read_and_close().unwrap();
        snapshot
    }

    fn dust_policy() -> MassDensityPolicy {
        MassDensityPolicy {
            mass_fraction: 1.0,
            max_temperature: 10000.0,
            use_metallicity: true,
        }
    }

    #[test]
    fn temperature_cutoff_and_metallicity_shape_the_total_mass() {
        let snapshot = two_cell_voronoi(dust_policy());

        // Second cell is above the cutoff, so only 1 M☉ × Z = 0.01 remains
        assert_relative_eq!(
            snapshot.mass(),
            0.01 * SOLAR_MASS_KG,
            max_relative = 1e-12
        );
        assert!(!snapshot.holds_number());
        assert_eq!(snapshot.num_entities(), 2);
    }

    #[test]
    fn mass_fraction_multiplies_the_total() {
        let mut policy = dust_policy();
        policy.mass_fraction = 0.3;
        let snapshot = two_cell_voronoi(policy);

        assert_relative_eq!(
            snapshot.mass(),
            0.3 * 0.01 * SOLAR_MASS_KG,
            max_relative = 1e-12
        );
    }

    #[test]
    fn gas_policy_keeps_hot_cells() {
        // No temperature cutoff: both cells contribute, metallicity applies
        let policy = MassDensityPolicy {
            mass_fraction: 1.0,
            max_temperature: 0.0,
            use_metallicity: true,
        };
        let snapshot = two_cell_voronoi(policy);

        assert_relative_eq!(
            snapshot.mass(),
            (0.01 + 0.02) * SOLAR_MASS_KG,
            max_relative = 1e-12
        );
    }

    #[test]
    fn voronoi_volumes_cover_the_domain() {
        let snapshot = two_cell_voronoi(dust_policy());
        let total: f64 = (0..snapshot.num_entities())
            .map(|i| snapshot.entity_volume(i))
            .sum();
        assert_relative_eq!(total, snapshot.domain().volume(), max_relative = 1e-9);
    }

    #[test]
    fn generated_positions_track_the_mass_distribution() {
        let snapshot = two_cell_voronoi(dust_policy());
        let mut rng = ChaChaRng::seed_from_u64(42);

        // All effective mass lives in the x < 0 cell
        for _ in 0..200 {
            let p = snapshot.generate_position(&mut rng).unwrap();
            assert!(p.x < 0.0, "Sample {:?} should be in the x<0 cell", p);
            assert!(snapshot.domain().contains(&p));
        }
    }

    #[test]
    fn position_generation_is_deterministic_per_seed() {
        let snapshot = two_cell_voronoi(dust_policy());

        let mut rng1 = ChaChaRng::seed_from_u64(7);
        let mut rng2 = ChaChaRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(
                snapshot.generate_position(&mut rng1),
                snapshot.generate_position(&mut rng2)
            );
        }
    }

    #[test]
    fn density_is_zero_outside_the_domain() {
        let snapshot = two_cell_voronoi(dust_policy());
        let outside = Point3::new(5.0 * PC_TO_M, 0.0, 0.0);
        assert_relative_eq!(snapshot.density(&outside), 0.0);
        assert!(snapshot.parameters(&outside).is_empty());
    }

    #[test]
    fn velocity_and_field_default_to_zero_when_not_imported() {
        let snapshot = two_cell_voronoi(dust_policy());
        let p = Point3::new(-0.5 * PC_TO_M, 0.0, 0.0);
        assert_eq!(snapshot.velocity(&p).norm(), 0.0);
        assert_eq!(snapshot.magnetic_field(&p).norm(), 0.0);
        assert_relative_eq!(snapshot.temperature(&p), 100.0);
    }

    #[test]
    fn cell_snapshot_density_and_columns() {
        // One cubic cell, 2 m on a side, 8 kg → 1 kg/m³
        let text = "\
# column 1: xmin (m)
# column 2: ymin (m)
# column 3: zmin (m)
# column 4: xmax (m)
# column 5: ymax (m)
# column 6: zmax (m)
# column 7: mass (kg)
-1 -1 -1 1 1 1 8
";
        let file = TextColumnFile::from_string("cell.txt", text);
        let mut snapshot = Snapshot::open_cell(file, ValueKind::Mass);
        snapshot.read_and_close().unwrap();

        assert_relative_eq!(snapshot.mass(), 8.0);
        assert_relative_eq!(snapshot.density(&Point3::new(0.0, 0.0, 0.0)), 1.0);

        // Column density through the center: ρ × extent = 1 × 2
        assert_relative_eq!(snapshot.sigma_x(), 2.0, max_relative = 1e-9);
        assert_relative_eq!(snapshot.sigma_z(), 2.0, max_relative = 1e-9);
    }

    #[test]
    fn particle_snapshot_samples_inside_smoothing_spheres() {
        // One particle at the origin with a 1 m smoothing length
        let text = "\
# column 1: x (m)
# column 2: y (m)
# column 3: z (m)
# column 4: smoothing length (m)
# column 5: mass (kg)
0 0 0 1 4.18879
";
        let file = TextColumnFile::from_string("particles.txt", text);
        let mut snapshot = Snapshot::open_particle(file, ValueKind::Mass);
        snapshot.read_and_close().unwrap();

        // Mass / sphere volume = 4.18879 / (4π/3) ≈ 1 kg/m³
        assert_relative_eq!(
            snapshot.density(&Point3::new(0.0, 0.0, 0.1)),
            1.0,
            max_relative = 1e-4
        );

        let mut rng = ChaChaRng::seed_from_u64(3);
        for _ in 0..100 {
            let p = snapshot.generate_position(&mut rng).unwrap();
            assert!(
                (p - Point3::origin()).norm() <= 1.0,
                "Sample {:?} escapes the smoothing sphere",
                p
            );
        }
    }

    #[test]
    fn number_kind_reports_counts() {
        let text = "0 0 0 1000\n";
        let file = TextColumnFile::from_string("sites.txt", text);
        let mut snapshot =
            Snapshot::open_voronoi(file, Box3::cube(PC_TO_M), ValueKind::Number).unwrap();
        snapshot.read_and_close().unwrap();

        assert!(snapshot.holds_number());
        assert_relative_eq!(snapshot.mass(), 1000.0);
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        let file = TextColumnFile::from_string("sites.txt", "0 0 0 1\n");
        let domain = Box3::new(
            Point3::new(0.0, -1.0, -1.0),
            Point3::new(0.0, 1.0, 1.0),
        );
        assert!(Snapshot::open_voronoi(file, domain, ValueKind::Mass).is_err());
    }
}
