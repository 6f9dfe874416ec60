mod tests {
    use approx::assert_relative_eq;

    use crate::mass::{Mass, SOLAR_MASS_KG};

    #[test]
    fn test_mass_conversions() {
        let one_solar = Mass::from_solar_masses(1.0);
        assert_relative_eq!(one_solar.to_kg(), SOLAR_MASS_KG);

        let from_kg = Mass::from_kg(SOLAR_MASS_KG);
        assert_relative_eq!(from_kg.to_solar_masses(), 1.0);

        let from_grams = Mass::from_grams(1000.0);
        assert_relative_eq!(from_grams.to_kg(), 1.0);
        assert_relative_eq!(from_grams.to_grams(), 1000.0);
    }

    #[test]
    fn test_mass_arithmetic() {
        let m1 = Mass::from_kg(4.0);
        let m2 = Mass::from_kg(2.0);

        assert_relative_eq!((m1 + m2).to_kg(), 6.0);
        assert_relative_eq!((m1 - m2).to_kg(), 2.0);
        assert_relative_eq!((m1 * 0.5).to_kg(), 2.0);
        assert_relative_eq!((m1 / 4.0).to_kg(), 1.0);
        assert_relative_eq!(m1 / m2, 2.0);
    }

    #[test]
    fn test_mass_ordering() {
        let small = Mass::from_kg(1.0);
        let large = Mass::from_kg(2.0);

        assert!(small < large);
        assert_relative_eq!(small.max(large).to_kg(), 2.0);
    }
}
