mod tests {
    use approx::assert_relative_eq;

    use crate::volume_density::{VolumeDensity, SOLAR_PER_PC3_TO_KG_PER_M3};

    #[test]
    fn test_density_conversions() {
        let rho = VolumeDensity::from_solar_masses_per_pc3(1.0);
        assert_relative_eq!(rho.to_kg_per_m3(), SOLAR_PER_PC3_TO_KG_PER_M3);
        assert_relative_eq!(rho.to_solar_masses_per_pc3(), 1.0);

        let water = VolumeDensity::from_g_per_cm3(1.0);
        assert_relative_eq!(water.to_kg_per_m3(), 1000.0);
    }

    #[test]
    fn test_solar_per_pc3_magnitude() {
        // 1 M☉/pc³ ≈ 6.77e-20 kg/m³
        assert_relative_eq!(
            SOLAR_PER_PC3_TO_KG_PER_M3,
            6.77e-20,
            max_relative = 1e-2
        );
    }

    #[test]
    fn test_density_arithmetic() {
        let d1 = VolumeDensity::from_kg_per_m3(2.0);
        let d2 = VolumeDensity::from_kg_per_m3(1.0);

        assert_relative_eq!((d1 + d2).to_kg_per_m3(), 3.0);
        assert_relative_eq!((d1 - d2).to_kg_per_m3(), 1.0);
        assert_relative_eq!((d1 * 2.0).to_kg_per_m3(), 4.0);
        assert_relative_eq!((d1 / 2.0).to_kg_per_m3(), 1.0);
    }
}
