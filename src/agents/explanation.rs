//! 花期解释智能体：基于LLM生成生态学解释

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::compatibility::CompatibilityVerdict;
use crate::config::LLMConfig;
use crate::error::ProviderError;
use crate::llm::LLMClient;
use crate::reference::FlowerProfile;
use crate::types::query::{ClimateHint, Coordinates};

/// 传递给解释Provider的上下文
#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationRequest {
    pub region: String,
    pub flower: FlowerProfile,
    pub compatibility: CompatibilityVerdict,
    pub season: String,
    pub as_of_date: NaiveDate,
    pub coordinates: Option<Coordinates>,
    pub climate: Option<ClimateHint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub text: String,
    /// 是否真正调用了后端模型
    pub used_real_backend: bool,
}

#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(&self, request: &ExplanationRequest) -> Result<Explanation, ProviderError>;
}

const SYSTEM_PROMPT: &str = "You are a world-renowned botanist and ecologist with decades of experience in plant phenology, ecology and climate science. You explain flowering phenomena in a way that is scientifically rigorous yet easy for the general public to understand. You never invent observations: if a flower cannot grow naturally in a region, you say so plainly.";

/// LLM 驱动的解释Provider，未配置LLM时返回 `NotConfigured`
#[derive(Clone)]
pub struct LlmExplanationProvider {
    client: Option<LLMClient>,
}

impl LlmExplanationProvider {
    pub fn new(client: LLMClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn from_config(config: &LLMConfig) -> anyhow::Result<Self> {
        if !config.is_configured() {
            info!("⚠️ 未配置LLM API KEY，解释将使用本地模板");
            return Ok(Self::disabled());
        }
        Ok(Self::new(LLMClient::new(config.clone())?))
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl ExplanationProvider for LlmExplanationProvider {
    async fn explain(&self, request: &ExplanationRequest) -> Result<Explanation, ProviderError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("LLM API key is not set".to_string()))?;

        let user_prompt = build_user_prompt(request);
        debug!(region = %request.region, flower = %request.flower.common_name, "📝 生成花期解释");

        let text = client
            .prompt(SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(|e| ProviderError::Backend(e.to_string()))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "model returned an empty explanation".to_string(),
            ));
        }

        Ok(Explanation {
            text: text.to_string(),
            used_real_backend: true,
        })
    }
}

/// 构造用户提示词，兼容性警告作为硬性约束写入
pub fn build_user_prompt(request: &ExplanationRequest) -> String {
    let flower = &request.flower;
    let scientific_name = if flower.scientific_name.is_empty() {
        "scientific name unknown"
    } else {
        flower.scientific_name.as_str()
    };
    let climate = request
        .climate
        .as_ref()
        .filter(|hint| !hint.is_empty())
        .map(ClimateHint::describe)
        .unwrap_or_else(|| "Not available".to_string());

    let mut prompt = format!(
        "Generate a scientifically accurate explanation of the blooming patterns of the flower below.\n\n\
Context Data:\n\
- Region: {}\n\
- Flower: {} ({})\n\
- Date: {}\n\
- Season: {}\n\
- Known Bloom Period: {}\n\
- Climate: {}\n",
        request.region,
        flower.common_name,
        scientific_name,
        request.as_of_date.format("%Y-%m-%d"),
        request.season,
        flower.canonical_bloom_period,
        climate,
    );

    if let Some(coordinates) = &request.coordinates {
        prompt.push_str(&format!(
            "- Coordinates: longitude {:.4}, latitude {:.4}\n",
            coordinates.longitude, coordinates.latitude
        ));
    }

    if let Some(warning) = request
        .compatibility
        .warning_text
        .as_deref()
        .filter(|_| !request.compatibility.compatible)
    {
        prompt.push_str(&format!(
            "\nHARD CONSTRAINT: {}\n\
Do not describe the flower as thriving, flourishing or naturally blooming in this region. \
Explain why the climate is unsuitable and where it could be seen instead.\n",
            warning
        ));
    }

    prompt.push_str(
        "\nCover the ecological factors that influence bloom timing in this region, \
seasonal timing and photoperiod effects, climate conditions, and the ecological significance of the flower. \
Keep it informative yet accessible, around 150-250 words.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::classify;
    use crate::reference::ReferenceData;

    fn request(flower: &str, region: &str) -> ExplanationRequest {
        let reference = ReferenceData::builtin();
        let profile = reference.resolve_flower(flower);
        let compatibility = classify(&profile, region, reference.keywords());
        ExplanationRequest {
            region: region.to_string(),
            flower: profile,
            compatibility,
            season: "Spring 2026".to_string(),
            as_of_date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            coordinates: None,
            climate: None,
        }
    }

    #[test]
    fn test_prompt_carries_hard_constraint_when_incompatible() {
        let prompt = build_user_prompt(&request("tulip", "Kerala, India"));
        assert!(prompt.contains("HARD CONSTRAINT"));
        assert!(prompt.contains("Climate warning"));
        assert!(prompt.contains("Tulipa"));
    }

    #[test]
    fn test_prompt_without_constraint_when_compatible() {
        let mut req = request("tulip", "Kashmir Valley");
        req.coordinates = Some(Coordinates::new(74.8, 34.1));
        let prompt = build_user_prompt(&req);

        assert!(!prompt.contains("HARD CONSTRAINT"));
        assert!(prompt.contains("- Date: 2026-04-02"));
        assert!(prompt.contains("latitude 34.1000"));
        assert!(prompt.contains("- Climate: Not available"));
    }

    #[tokio::test]
    async fn test_disabled_provider_reports_not_configured() {
        let provider = LlmExplanationProvider::disabled();
        assert!(!provider.is_enabled());

        let err = provider
            .explain(&request("rose", "Ohio"))
            .await
            .unwrap_err();
        assert!(err.is_not_configured());
    }

    #[test]
    fn test_from_config_without_key_is_disabled() {
        let config = LLMConfig {
            api_key: String::new(),
            ..Default::default()
        };
        let provider = LlmExplanationProvider::from_config(&config).unwrap();
        assert!(!provider.is_enabled());
    }
}
