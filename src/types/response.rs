use serde::{Deserialize, Serialize};

use crate::agents::web_search::{BloomStatusSignal, SearchSource};
use crate::compatibility::CompatibilityVerdict;
use crate::reference::{ClimateClass, FlowerProfile};
use crate::types::provider_result::ProviderReport;

/// 花量等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbundanceLevel {
    High,
    Medium,
    Low,
    None,
}

impl std::fmt::Display for AbundanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbundanceLevel::High => write!(f, "high"),
            AbundanceLevel::Medium => write!(f, "medium"),
            AbundanceLevel::Low => write!(f, "low"),
            AbundanceLevel::None => write!(f, "none"),
        }
    }
}

impl AbundanceLevel {
    /// 固定映射表，不是数值阈值
    pub fn from_signal(signal: BloomStatusSignal) -> Self {
        match signal {
            BloomStatusSignal::Active => AbundanceLevel::High,
            BloomStatusSignal::Upcoming => AbundanceLevel::Medium,
            BloomStatusSignal::Past => AbundanceLevel::Low,
            BloomStatusSignal::NotSuitable => AbundanceLevel::None,
            BloomStatusSignal::Unknown => AbundanceLevel::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowerView {
    pub common_name: String,
    pub scientific_name: String,
    pub climate_class: ClimateClass,
}

impl From<&FlowerProfile> for FlowerView {
    fn from(profile: &FlowerProfile) -> Self {
        Self {
            common_name: profile.common_name.clone(),
            scientific_name: profile.scientific_name.clone(),
            climate_class: profile.climate_class,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResearchView {
    pub summary: String,
    pub source_count: usize,
    pub sources: Vec<SearchSource>,
    pub bloom_status: BloomStatusSignal,
}

impl WebResearchView {
    pub fn empty() -> Self {
        Self {
            summary: String::new(),
            source_count: 0,
            sources: Vec::new(),
            bloom_status: BloomStatusSignal::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderReports {
    pub explanation: ProviderReport,
    pub web_research: ProviderReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub request_id: String,
    /// RFC 3339
    pub timestamp: String,
    pub processing_time_ms: f64,
    pub llm_used: bool,
    pub search_available: bool,
    pub fallback: bool,
    pub error: Option<String>,
    pub providers: ProviderReports,
}

/// 一次查询的完整响应，所有字段总是存在
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloomResponse {
    pub region: String,
    pub flower: FlowerView,
    pub abundance_level: AbundanceLevel,
    pub season: String,
    pub climate: String,
    pub known_bloom_period: String,
    pub notes: String,
    pub compatibility: CompatibilityVerdict,
    pub explanation_text: String,
    pub factors: Vec<String>,
    pub web_research: WebResearchView,
    pub metadata: ResponseMetadata,
}
