mod tests {
    use approx::assert_relative_eq;
    use units::Length;

    use crate::mix::{
        MaterialMix, MaterialType, MeanInterstellarDustMix, NeutralHydrogenGasMix,
    };
    use crate::mix_family::{MaterialMixFamily, SelectMixFamily};

    #[test]
    fn dust_mix_extinction_rises_toward_the_uv() {
        let mix = MeanInterstellarDustMix::new();
        let uv = mix.section_ext(Length::from_micron(0.15));
        let v = mix.section_ext(Length::from_micron(0.55));
        let ir = mix.section_ext(Length::from_micron(2.2));

        assert!(uv > v, "UV extinction {} should exceed V {}", uv, v);
        assert!(v > ir, "V extinction {} should exceed IR {}", v, ir);
    }

    #[test]
    fn dust_sections_split_by_albedo() {
        let mix = MeanInterstellarDustMix::new();
        let lambda = Length::from_micron(0.55);

        assert_relative_eq!(
            mix.section_abs(lambda) + mix.section_sca(lambda),
            mix.section_ext(lambda),
            max_relative = 1e-12
        );
        assert!(mix.is_dust());
        assert_eq!(mix.material_type(), MaterialType::Dust);
    }

    #[test]
    fn gas_mix_absorbs_only_ionizing_radiation() {
        let mix = NeutralHydrogenGasMix::new();

        assert_eq!(mix.section_abs(Length::from_micron(0.55)), 0.0);
        assert!(mix.section_abs(Length::from_angstrom(900.0)) > 0.0);
        assert_eq!(mix.section_sca(Length::from_angstrom(900.0)), 0.0);
        assert!(mix.is_gas());
    }

    #[test]
    fn select_family_picks_by_rounded_clamped_index() {
        let family = SelectMixFamily::new(vec![
            Box::new(MeanInterstellarDustMix::new()),
            Box::new(NeutralHydrogenGasMix::new()),
        ]);

        assert_eq!(family.mix(&[0.0]).material_type(), MaterialType::Dust);
        assert_eq!(family.mix(&[1.0]).material_type(), MaterialType::Gas);
        assert_eq!(family.mix(&[0.4]).material_type(), MaterialType::Dust);
        assert_eq!(family.mix(&[0.6]).material_type(), MaterialType::Gas);
        // Clamped
        assert_eq!(family.mix(&[9.0]).material_type(), MaterialType::Gas);
        assert_eq!(family.mix(&[-3.0]).material_type(), MaterialType::Dust);
        // Empty parameter vector selects the default
        assert_eq!(family.mix(&[]).material_type(), MaterialType::Dust);
    }

    #[test]
    fn select_family_declares_one_parameter() {
        let family = SelectMixFamily::new(vec![Box::new(MeanInterstellarDustMix::new())]);
        let info = family.parameter_info();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].name, "MixIndex");
    }
}
