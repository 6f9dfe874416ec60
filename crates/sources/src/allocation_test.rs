mod tests {
    use approx::assert_relative_eq;

    use crate::allocation::{allocate_counts, launch_weights, prefix_map};

    #[test]
    fn half_bias_mixes_proportional_and_uniform_shares() {
        // Three sources, L = [1, 2, 1], w = [1, 1, 1], ξ = 0.5:
        // W = 0.5·[0.25, 0.5, 0.25] + 0.5·[1/3, 1/3, 1/3]
        let weights = launch_weights(&[1.0, 2.0, 1.0], &[1.0, 1.0, 1.0], 0.5);

        assert_relative_eq!(weights[0], 0.125 + 1.0 / 6.0, max_relative = 1e-12);
        assert_relative_eq!(weights[1], 0.25 + 1.0 / 6.0, max_relative = 1e-12);
        assert_relative_eq!(weights[2], 0.125 + 1.0 / 6.0, max_relative = 1e-12);
        assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, max_relative = 1e-15);
    }

    #[test]
    fn scenario_three_sources_at_half_bias() {
        let weights = launch_weights(&[1.0, 2.0, 1.0], &[1.0, 1.0, 1.0], 0.5);
        let counts = allocate_counts(&weights, 1000);

        assert_eq!(counts, vec![292, 416, 292]);
        assert_eq!(prefix_map(&counts), vec![0, 292, 708, 1000]);
    }

    #[test]
    fn zero_bias_is_purely_luminosity_proportional() {
        let weights = launch_weights(&[1.0, 3.0], &[1.0, 1.0], 0.0);
        assert_relative_eq!(weights[0], 0.25, max_relative = 1e-12);
        assert_relative_eq!(weights[1], 0.75, max_relative = 1e-12);

        let counts = allocate_counts(&weights, 100);
        assert_eq!(counts, vec![25, 75]);
    }

    #[test]
    fn unit_bias_is_weight_uniform_regardless_of_luminosity() {
        let weights = launch_weights(&[0.0, 0.0], &[1.0, 1.0], 1.0);
        assert_relative_eq!(weights[0], 0.5, max_relative = 1e-12);
        assert_relative_eq!(weights[1], 0.5, max_relative = 1e-12);

        // Scenario: N = 10 splits evenly even though nothing shines
        assert_eq!(allocate_counts(&weights, 10), vec![5, 5]);
    }

    #[test]
    fn emission_weights_scale_the_uniform_share() {
        let weights = launch_weights(&[1.0, 1.0], &[1.0, 3.0], 1.0);
        assert_relative_eq!(weights[0], 0.25, max_relative = 1e-12);
        assert_relative_eq!(weights[1], 0.75, max_relative = 1e-12);
    }

    #[test]
    fn all_zero_emission_weights_fall_back_to_one() {
        let weights = launch_weights(&[1.0, 3.0], &[0.0, 0.0], 0.5);
        // Same as w = [1, 1]
        let expected = launch_weights(&[1.0, 3.0], &[1.0, 1.0], 0.5);
        assert_relative_eq!(weights[0], expected[0], max_relative = 1e-12);
        assert_relative_eq!(weights[1], expected[1], max_relative = 1e-12);
    }

    #[test]
    fn dark_source_with_weight_gets_only_the_uniform_share() {
        let weights = launch_weights(&[0.0, 4.0], &[1.0, 1.0], 0.5);
        // Proportional term gives it nothing; uniform term gives ξ/2
        assert_relative_eq!(weights[0], 0.25, max_relative = 1e-12);
        assert_relative_eq!(weights[1], 0.75, max_relative = 1e-12);
    }

    #[test]
    fn counts_always_sum_to_n() {
        let cases: &[(&[f64], usize)] = &[
            (&[0.3333, 0.3333, 0.3334], 100),
            (&[0.1, 0.2, 0.3, 0.4], 7),
            (&[1.0], 13),
            (&[0.5, 0.5], 0),
            (&[0.21, 0.19, 0.35, 0.25], 997),
        ];
        for (weights, n) in cases {
            let counts = allocate_counts(weights, *n);
            assert_eq!(counts.iter().sum::<usize>(), *n, "weights {:?}", weights);
        }
    }

    #[test]
    fn remainder_ties_break_by_ascending_index() {
        // Raw allocations 2.5 each: one remainder packet goes to index 0
        let counts = allocate_counts(&[0.25, 0.25, 0.25, 0.25], 10);
        assert_eq!(counts, vec![3, 3, 2, 2]);
    }

    #[test]
    fn prefix_map_is_monotonic_with_sentinel() {
        let map = prefix_map(&[3, 0, 5]);
        assert_eq!(map, vec![0, 3, 3, 8]);
        assert!(map.windows(2).all(|w| w[0] <= w[1]));
    }
}
