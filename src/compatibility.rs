//! 气候兼容性检查，纯函数，无I/O

use serde::{Deserialize, Serialize};

use crate::reference::{ClimateClass, FlowerProfile, RegionKeywords};

/// 基于关键词的地区气候归类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionClimate {
    Tropical,
    ColdTemperate,
    Unclassified,
}

impl std::fmt::Display for RegionClimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionClimate::Tropical => write!(f, "tropical"),
            RegionClimate::ColdTemperate => write!(f, "cold/temperate"),
            RegionClimate::Unclassified => write!(f, "unclassified"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityVerdict {
    pub compatible: bool,
    pub warning_text: Option<String>,
    pub region_climate: RegionClimate,
}

impl CompatibilityVerdict {
    fn compatible(region_climate: RegionClimate) -> Self {
        Self {
            compatible: true,
            warning_text: None,
            region_climate,
        }
    }
}

/// 同时命中或都未命中时视为无法归类
pub fn classify_region(region: &str, keywords: &RegionKeywords) -> RegionClimate {
    let region = region.to_lowercase();
    let tropical = keywords.tropical.iter().any(|k| region.contains(k.as_str()));
    let cold = keywords.cold.iter().any(|k| region.contains(k.as_str()));

    match (tropical, cold) {
        (true, false) => RegionClimate::Tropical,
        (false, true) => RegionClimate::ColdTemperate,
        _ => RegionClimate::Unclassified,
    }
}

pub fn classify(
    profile: &FlowerProfile,
    region: &str,
    keywords: &RegionKeywords,
) -> CompatibilityVerdict {
    let region_climate = classify_region(region, keywords);

    let requirement = match (profile.climate_class, region_climate) {
        (ClimateClass::Cold, RegionClimate::Tropical) => {
            "needs a cold climate with winter chilling"
        }
        (ClimateClass::Tropical, RegionClimate::ColdTemperate) => {
            "needs a warm, frost-free tropical climate"
        }
        _ => return CompatibilityVerdict::compatible(region_climate),
    };

    let warning = format!(
        "Climate warning: {} {}, but {} is classified as {}. It is not expected to flower outdoors there without controlled cultivation.",
        profile.display_name(),
        requirement,
        region.trim(),
        region_climate
    );

    CompatibilityVerdict {
        compatible: false,
        warning_text: Some(warning),
        region_climate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    fn verdict(flower: &str, region: &str) -> CompatibilityVerdict {
        let reference = ReferenceData::builtin();
        let profile = reference.resolve_flower(flower);
        classify(&profile, region, reference.keywords())
    }

    #[test]
    fn test_tulip_in_kerala_is_incompatible() {
        let verdict = verdict("tulip", "Kerala, India");
        assert!(!verdict.compatible);
        assert_eq!(verdict.region_climate, RegionClimate::Tropical);

        let warning = verdict.warning_text.unwrap();
        assert!(warning.contains("tulip (Tulipa)"));
        assert!(warning.contains("Kerala, India"));
        assert!(warning.contains("tropical"));
    }

    #[test]
    fn test_tulip_in_kashmir_is_compatible() {
        let verdict = verdict("tulip", "Kashmir Valley");
        assert!(verdict.compatible);
        assert!(verdict.warning_text.is_none());
        assert_eq!(verdict.region_climate, RegionClimate::ColdTemperate);
    }

    #[test]
    fn test_tropical_flower_in_cold_region_is_incompatible() {
        let verdict = verdict("Orchid", "Ladakh");
        assert!(!verdict.compatible);
        assert!(verdict.warning_text.unwrap().contains("tropical climate"));
    }

    #[test]
    fn test_unclassified_region_defaults_to_compatible() {
        assert!(verdict("tulip", "Ohio").compatible);
        assert_eq!(
            verdict("tulip", "Ohio").region_climate,
            RegionClimate::Unclassified
        );
    }

    #[test]
    fn test_region_matching_both_sets_is_unclassified() {
        let verdict = verdict("tulip", "Kerala to Kashmir road trip");
        assert!(verdict.compatible);
        assert_eq!(verdict.region_climate, RegionClimate::Unclassified);
    }

    #[test]
    fn test_unknown_and_universal_flowers_never_conflict() {
        assert!(verdict("Protea", "Kerala").compatible);
        assert!(verdict("sunflower", "Kerala").compatible);
        assert!(verdict("", "Alaska").compatible);
    }
}
