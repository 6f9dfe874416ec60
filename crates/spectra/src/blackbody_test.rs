mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;
    use units::{Length, Luminosity, Temperature};

    use crate::blackbody::BlackbodySed;
    use crate::range::WavelengthRange;

    fn optical_range() -> WavelengthRange {
        WavelengthRange::new(Length::from_micron(0.09), Length::from_micron(20.0)).unwrap()
    }

    #[test]
    fn cdf_carries_the_requested_luminosity() {
        let sed = BlackbodySed::new(Temperature::from_kelvin(5772.0));
        let luminosity = Luminosity::from_solar_luminosities(1.0);

        let cdf = sed.cdf(&optical_range(), luminosity);
        assert_relative_eq!(
            cdf.luminosity().to_watts(),
            luminosity.to_watts(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn samples_stay_inside_the_range() {
        let sed = BlackbodySed::new(Temperature::from_kelvin(5772.0));
        let cdf = sed.cdf(&optical_range(), Luminosity::from_watts(1.0));
        let mut rng = ChaChaRng::seed_from_u64(42);

        for _ in 0..500 {
            let lambda = cdf.sample(&mut rng).unwrap();
            assert!(optical_range().contains(lambda), "{} out of range", lambda.to_m());
        }
    }

    #[test]
    fn solar_temperature_peaks_near_half_micron() {
        // Wien's law: λ_peak ≈ 2898 µm·K / T ≈ 0.50 µm at 5772 K
        let sed = BlackbodySed::new(Temperature::from_kelvin(5772.0));
        let cdf = sed.cdf(&optical_range(), Luminosity::from_watts(1.0));

        let peak = cdf.density(Length::from_micron(0.50));
        assert!(peak > cdf.density(Length::from_micron(0.2)));
        assert!(peak > cdf.density(Length::from_micron(2.0)));
    }

    #[test]
    fn hotter_blackbody_samples_shorter_wavelengths() {
        let range = optical_range();
        let hot = BlackbodySed::new(Temperature::from_kelvin(20000.0))
            .cdf(&range, Luminosity::from_watts(1.0));
        let cool = BlackbodySed::new(Temperature::from_kelvin(3000.0))
            .cdf(&range, Luminosity::from_watts(1.0));

        let mut rng = ChaChaRng::seed_from_u64(7);
        let mean = |cdf: &crate::cdf::SpectralCdf, rng: &mut ChaChaRng| -> f64 {
            (0..500).map(|_| cdf.sample(rng).unwrap().to_m()).sum::<f64>() / 500.0
        };

        let hot_mean = mean(&hot, &mut rng);
        let cool_mean = mean(&cool, &mut rng);
        assert!(
            hot_mean < cool_mean,
            "hot mean {} should be below cool mean {}",
            hot_mean,
            cool_mean
        );
    }

    #[test]
    fn zero_temperature_yields_zero_distribution() {
        let sed = BlackbodySed::new(Temperature::zero());
        let cdf = sed.cdf(&optical_range(), Luminosity::from_watts(1.0));
        assert!(cdf.is_zero());
    }
}
