//! 确定性的本地模板：Provider不可用时的解释、备注与生态因子

use crate::compatibility::CompatibilityVerdict;
use crate::reference::FlowerProfile;
use crate::types::query::ClimateHint;
use crate::types::response::AbundanceLevel;
use crate::utils::season::SeasonContext;

const STANDARD_FACTORS: [&str; 6] = [
    "Temperature patterns and seasonal changes",
    "Photoperiod (day length)",
    "Precipitation and soil moisture",
    "Soil composition and nutrients",
    "Pollinator activity",
    "Local microclimate conditions",
];

/// 同样的输入总是得到同样的文本
pub fn fallback_explanation(
    profile: &FlowerProfile,
    region: &str,
    season: &str,
    verdict: &CompatibilityVerdict,
) -> String {
    let name = profile.display_name();

    if let Some(warning) = verdict.warning_text.as_deref().filter(|_| !verdict.compatible) {
        return format!(
            "{} Outdoor flowering of {} in {} is not expected during {}. \
Its typical bloom period in suitable climates is {}. \
It can still be seen in greenhouses or botanical gardens that reproduce the conditions it needs.",
            warning, name, region, season, profile.canonical_bloom_period
        );
    }

    format!(
        "Bloom outlook for {} in {} during {}. The typical bloom period is {}. \
Flowering time depends on temperature, day length, rainfall and soil conditions, \
so local timing can shift from year to year. \
This summary was generated from reference data because a live explanation was unavailable.",
        name, region, season, profile.canonical_bloom_period
    )
}

/// 调研结果不可用时的估计
pub fn heuristic_abundance(
    profile: &FlowerProfile,
    verdict: &CompatibilityVerdict,
    season: &SeasonContext,
) -> AbundanceLevel {
    if !verdict.compatible {
        return AbundanceLevel::None;
    }
    match profile.bloom_window().contains(season.northern_month) {
        Some(true) => AbundanceLevel::Medium,
        Some(false) => AbundanceLevel::Low,
        None => AbundanceLevel::Medium,
    }
}

pub fn notes(
    profile: &FlowerProfile,
    region: &str,
    verdict: &CompatibilityVerdict,
    abundance: AbundanceLevel,
) -> String {
    if let Some(warning) = verdict.warning_text.as_deref().filter(|_| !verdict.compatible) {
        return warning.to_string();
    }

    let flower = &profile.common_name;
    match abundance {
        AbundanceLevel::High => format!("Peak bloom activity reported for {} in {}.", flower, region),
        AbundanceLevel::Medium => format!(
            "Moderate bloom activity expected for {} in {}.",
            flower, region
        ),
        AbundanceLevel::Low => format!(
            "Limited bloom activity expected for {} in {}; it is outside its usual bloom window.",
            flower, region
        ),
        AbundanceLevel::None => format!("No bloom activity expected for {} in {}.", flower, region),
    }
}

pub fn factors(
    profile: &FlowerProfile,
    verdict: &CompatibilityVerdict,
    climate: Option<&ClimateHint>,
) -> Vec<String> {
    let mut factors = Vec::with_capacity(STANDARD_FACTORS.len() + 2);
    if !verdict.compatible {
        factors.push(format!(
            "Climate mismatch: {} flower in a {} region",
            profile.climate_class, verdict.region_climate
        ));
    }
    factors.extend(STANDARD_FACTORS.iter().map(|f| f.to_string()));
    if let Some(hint) = climate.filter(|hint| !hint.is_empty()) {
        factors.push(format!("Observed climate: {}", hint.describe()));
    }
    factors
}

/// 响应中的climate字段
pub fn climate_summary(verdict: &CompatibilityVerdict, climate: Option<&ClimateHint>) -> String {
    match climate.filter(|hint| !hint.is_empty()) {
        Some(hint) => hint.describe(),
        None => format!("Region classified as {}", verdict.region_climate),
    }
}
