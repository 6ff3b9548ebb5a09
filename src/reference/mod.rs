//! 静态参考数据：花种档案与地区气候关键词

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

mod builtin;

pub const ANY_FLOWER: &str = "any flower";
pub const UNKNOWN_BLOOM_PERIOD: &str = "Varies by region";

/// 花种适应的气候类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClimateClass {
    Tropical,
    Temperate,
    Cold,
    Universal,
    #[default]
    Unknown,
}

impl std::fmt::Display for ClimateClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClimateClass::Tropical => write!(f, "tropical"),
            ClimateClass::Temperate => write!(f, "temperate"),
            ClimateClass::Cold => write!(f, "cold"),
            ClimateClass::Universal => write!(f, "universal"),
            ClimateClass::Unknown => write!(f, "unknown"),
        }
    }
}

/// 花期窗口，月份取值 1-12
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloomWindow {
    YearRound,
    Months { start: u32, end: u32 },
    Unknown,
}

impl BloomWindow {
    /// 解析 "March to May" / "Year-round (varies)" 这类描述
    pub fn parse(period: &str) -> Self {
        let lower = period.trim().to_lowercase();
        if lower.starts_with("year-round") || lower.starts_with("year round") {
            return BloomWindow::YearRound;
        }

        let months: Vec<u32> = lower
            .split(|c: char| !c.is_ascii_alphabetic())
            .filter_map(month_number)
            .collect();

        match months.as_slice() {
            [start, .., end] => BloomWindow::Months {
                start: *start,
                end: *end,
            },
            [single] => BloomWindow::Months {
                start: *single,
                end: *single,
            },
            [] => BloomWindow::Unknown,
        }
    }

    /// 判断月份是否落在窗口内，`None` 表示窗口未知
    pub fn contains(&self, month: u32) -> Option<bool> {
        match *self {
            BloomWindow::YearRound => Some(true),
            BloomWindow::Unknown => None,
            BloomWindow::Months { start, end } if start <= end => {
                Some(month >= start && month <= end)
            }
            // 跨年窗口，例如 November to February
            BloomWindow::Months { start, end } => Some(month >= start || month <= end),
        }
    }
}

fn month_number(word: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    if word.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| *m == word || (word.len() == 3 && m.starts_with(word)))
        .map(|index| index as u32 + 1)
}

/// 花种档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowerProfile {
    pub common_name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub climate_class: ClimateClass,
    #[serde(default = "default_bloom_period")]
    pub canonical_bloom_period: String,
}

fn default_bloom_period() -> String {
    UNKNOWN_BLOOM_PERIOD.to_string()
}

impl FlowerProfile {
    pub fn new(
        common_name: &str,
        scientific_name: &str,
        climate_class: ClimateClass,
        canonical_bloom_period: &str,
    ) -> Self {
        Self {
            common_name: common_name.to_string(),
            scientific_name: scientific_name.to_string(),
            climate_class,
            canonical_bloom_period: canonical_bloom_period.to_string(),
        }
    }

    /// 未查到时合成的档案
    pub fn unknown(common_name: &str) -> Self {
        Self::new(
            common_name,
            "",
            ClimateClass::Unknown,
            UNKNOWN_BLOOM_PERIOD,
        )
    }

    pub fn any_flower() -> Self {
        Self::new(ANY_FLOWER, "", ClimateClass::Universal, UNKNOWN_BLOOM_PERIOD)
    }

    pub fn bloom_window(&self) -> BloomWindow {
        BloomWindow::parse(&self.canonical_bloom_period)
    }

    /// "tulip (Tulipa)"，学名为空时只返回俗名
    pub fn display_name(&self) -> String {
        if self.scientific_name.is_empty() {
            self.common_name.clone()
        } else {
            format!("{} ({})", self.common_name, self.scientific_name)
        }
    }
}

/// 地区关键词集合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionKeywords {
    pub tropical: Vec<String>,
    pub cold: Vec<String>,
}

impl Default for RegionKeywords {
    fn default() -> Self {
        Self {
            tropical: to_owned_list(builtin::TROPICAL_KEYWORDS),
            cold: to_owned_list(builtin::COLD_KEYWORDS),
        }
    }
}

impl RegionKeywords {
    fn normalized(self) -> Self {
        Self {
            tropical: normalize_list(self.tropical),
            cold: normalize_list(self.cold),
        }
    }
}

/// 参考数据文件格式
#[derive(Debug, Deserialize)]
struct ReferenceFile {
    #[serde(default)]
    flowers: Vec<FlowerProfile>,
    #[serde(default)]
    regions: Option<RegionKeywords>,
}

/// 进程级只读参考数据，通过 `Arc` 注入编排器
#[derive(Debug, Clone)]
pub struct ReferenceData {
    flowers: HashMap<String, FlowerProfile>,
    keywords: RegionKeywords,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceData {
    pub fn new(flowers: Vec<FlowerProfile>, keywords: RegionKeywords) -> Self {
        let flowers = flowers
            .into_iter()
            .map(|profile| (profile.common_name.trim().to_lowercase(), profile))
            .collect();
        Self {
            flowers,
            keywords: keywords.normalized(),
        }
    }

    /// 内置参考表
    pub fn builtin() -> Self {
        Self::new(builtin::flower_profiles(), RegionKeywords::default())
    }

    /// 从TOML文件加载，未提供地区关键词时使用内置关键词
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read reference data file: {:?}", path))?;
        Self::from_toml_str(&content)
            .context(format!("Failed to parse reference data file: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ReferenceFile = toml::from_str(content)?;
        if file.flowers.is_empty() {
            anyhow::bail!("reference data must define at least one flower");
        }
        Ok(Self::new(file.flowers, file.regions.unwrap_or_default()))
    }

    /// 按俗名查找（忽略大小写），未命中时返回合成档案
    pub fn resolve_flower(&self, flower: &str) -> FlowerProfile {
        let name = flower.trim();
        if name.is_empty() {
            return FlowerProfile::any_flower();
        }
        self.find_flower(name)
            .cloned()
            .unwrap_or_else(|| FlowerProfile::unknown(name))
    }

    pub fn find_flower(&self, flower: &str) -> Option<&FlowerProfile> {
        self.flowers.get(&flower.trim().to_lowercase())
    }

    pub fn keywords(&self) -> &RegionKeywords {
        &self.keywords
    }

    pub fn flower_count(&self) -> usize {
        self.flowers.len()
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn normalize_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests;
