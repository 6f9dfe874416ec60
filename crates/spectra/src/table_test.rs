mod tests {
    use approx::assert_relative_eq;
    use units::Length;

    use crate::error::SedError;
    use crate::range::WavelengthRange;
    use crate::table::SedTable;

    /// 3 wavelengths × 2 logU × 2 Z; value = base(λ index) × (1 + logU) × (1 + Z)
    fn test_table() -> SedTable {
        let lambdav = vec![1e-6, 2e-6, 3e-6];
        let log_uv = vec![0.0, 1.0];
        let zv = vec![0.0, 0.02];

        let mut lv = Vec::new();
        for (il, _) in lambdav.iter().enumerate() {
            for log_u in &log_uv {
                for z in &zv {
                    let base = (il + 1) as f64;
                    lv.push(base * (1.0 + log_u) * (1.0 + z));
                }
            }
        }
        SedTable::new(lambdav, log_uv, zv, lv).unwrap()
    }

    #[test]
    fn exact_grid_points_round_trip() {
        let table = test_table();
        assert_relative_eq!(table.value(Length::from_m(1e-6), 0.0, 0.0), 1.0);
        assert_relative_eq!(table.value(Length::from_m(2e-6), 1.0, 0.0), 4.0);
        assert_relative_eq!(
            table.value(Length::from_m(3e-6), 1.0, 0.02),
            3.0 * 2.0 * 1.02
        );
    }

    #[test]
    fn interpolation_is_linear_between_points() {
        let table = test_table();
        // Halfway between λ grid points 1 and 2 at (logU=0, Z=0): (1+2)/2
        assert_relative_eq!(table.value(Length::from_m(1.5e-6), 0.0, 0.0), 1.5);
        // Halfway along the logU axis
        assert_relative_eq!(table.value(Length::from_m(1e-6), 0.5, 0.0), 1.5);
    }

    #[test]
    fn out_of_range_queries_clamp_to_axis_bounds() {
        let table = test_table();
        // Below / above the λ axis
        assert_relative_eq!(
            table.value(Length::from_m(0.5e-6), 0.0, 0.0),
            table.value(Length::from_m(1e-6), 0.0, 0.0)
        );
        assert_relative_eq!(
            table.value(Length::from_m(9e-6), 0.0, 0.0),
            table.value(Length::from_m(3e-6), 0.0, 0.0)
        );
        // Beyond the logU and Z axes
        assert_relative_eq!(
            table.value(Length::from_m(1e-6), 5.0, 0.0),
            table.value(Length::from_m(1e-6), 1.0, 0.0)
        );
        assert_relative_eq!(
            table.value(Length::from_m(1e-6), 0.0, 1.0),
            table.value(Length::from_m(1e-6), 0.0, 0.02)
        );
    }

    #[test]
    fn axis_range_covers_lambda_axis() {
        let table = test_table();
        let range = table.axis_range();
        assert_relative_eq!(range.min().to_m(), 1e-6);
        assert_relative_eq!(range.max().to_m(), 3e-6);
    }

    #[test]
    fn cdf_respects_requested_range() {
        let table = test_table();
        let range = WavelengthRange::new(Length::from_m(1.5e-6), Length::from_m(2.5e-6)).unwrap();

        let cdf = table.cdf(&range, 0.0, 0.0);
        assert!(!cdf.is_zero());
        assert!(cdf.luminosity().to_watts() > 0.0);

        // Disjoint range yields the zero distribution
        let far = WavelengthRange::new(Length::from_m(1e-3), Length::from_m(2e-3)).unwrap();
        assert!(table.cdf(&far, 0.0, 0.0).is_zero());
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let result = SedTable::new(vec![1e-6, 2e-6], vec![0.0], vec![0.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(SedError::ShapeMismatch { .. })));
    }

    #[test]
    fn non_monotonic_axis_is_rejected() {
        let result = SedTable::new(
            vec![2e-6, 1e-6],
            vec![0.0],
            vec![0.0],
            vec![1.0, 2.0],
        );
        assert!(matches!(result, Err(SedError::NonMonotonicAxis { .. })));
    }
}
