#[cfg(test)]
mod tests {
    use crate::reference::{
        ANY_FLOWER, BloomWindow, ClimateClass, ReferenceData, UNKNOWN_BLOOM_PERIOD,
    };
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let reference = ReferenceData::builtin();

        let tulip = reference.resolve_flower("  TuLiP ");
        assert_eq!(tulip.common_name, "tulip");
        assert_eq!(tulip.scientific_name, "Tulipa");
        assert_eq!(tulip.climate_class, ClimateClass::Cold);

        let cherry = reference.resolve_flower("Cherry Blossom");
        assert_eq!(cherry.scientific_name, "Prunus serrulata");
        assert_eq!(reference.flower_count(), 10);
    }

    #[test]
    fn test_lookup_miss_synthesizes_unknown_profile() {
        let reference = ReferenceData::builtin();
        let profile = reference.resolve_flower("Protea");

        assert_eq!(profile.common_name, "Protea");
        assert_eq!(profile.scientific_name, "");
        assert_eq!(profile.climate_class, ClimateClass::Unknown);
        assert_eq!(profile.canonical_bloom_period, UNKNOWN_BLOOM_PERIOD);
        assert_eq!(profile.display_name(), "Protea");
    }

    #[test]
    fn test_empty_flower_means_any_flower() {
        let profile = ReferenceData::builtin().resolve_flower("");
        assert_eq!(profile.common_name, ANY_FLOWER);
        assert_eq!(profile.climate_class, ClimateClass::Universal);
    }

    #[test]
    fn test_bloom_window_parse() {
        assert_eq!(
            BloomWindow::parse("March to May"),
            BloomWindow::Months { start: 3, end: 5 }
        );
        assert_eq!(
            BloomWindow::parse("Nov - Feb"),
            BloomWindow::Months { start: 11, end: 2 }
        );
        assert_eq!(
            BloomWindow::parse("Year-round (varies)"),
            BloomWindow::YearRound
        );
        assert_eq!(BloomWindow::parse("Varies by region"), BloomWindow::Unknown);
    }

    #[test]
    fn test_bloom_window_contains() {
        let spring = BloomWindow::Months { start: 3, end: 5 };
        assert_eq!(spring.contains(4), Some(true));
        assert_eq!(spring.contains(10), Some(false));

        let winter = BloomWindow::Months { start: 11, end: 2 };
        assert_eq!(winter.contains(1), Some(true));
        assert_eq!(winter.contains(6), Some(false));

        assert_eq!(BloomWindow::Unknown.contains(6), None);
        assert_eq!(BloomWindow::YearRound.contains(6), Some(true));
    }

    #[test]
    fn test_from_file_with_custom_regions() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
    [[flowers]]
    common_name = "Edelweiss"
    scientific_name = "Leontopodium nivale"
    climate_class = "cold"
    canonical_bloom_period = "July to September"

    [regions]
    tropical = ["Mekong Delta"]
    cold = ["  Tyrol "]
    "#
        )
        .unwrap();

        let reference = ReferenceData::from_file(file.path()).unwrap();
        let edelweiss = reference.resolve_flower("edelweiss");
        assert_eq!(edelweiss.climate_class, ClimateClass::Cold);
        assert_eq!(
            edelweiss.bloom_window(),
            BloomWindow::Months { start: 7, end: 9 }
        );
        assert_eq!(reference.keywords().tropical, vec!["mekong delta"]);
        assert_eq!(reference.keywords().cold, vec!["tyrol"]);
    }

    #[test]
    fn test_from_file_defaults_regions_and_fields() {
        let reference = ReferenceData::from_toml_str(
            r#"
    [[flowers]]
    common_name = "Bluebell"
    "#,
        )
        .unwrap();

        let bluebell = reference.resolve_flower("BLUEBELL");
        assert_eq!(bluebell.climate_class, ClimateClass::Unknown);
        assert_eq!(bluebell.canonical_bloom_period, UNKNOWN_BLOOM_PERIOD);
        assert!(reference.keywords().tropical.contains(&"kerala".to_string()));
    }

    #[test]
    fn test_from_file_rejects_empty_table() {
        assert!(ReferenceData::from_toml_str("flowers = []").is_err());
        assert!(ReferenceData::from_file(Path::new("/nonexistent/reference.toml")).is_err());
    }
}
