//! Web调研智能体：并发查询多个搜索源并汇总

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{LLMConfig, SearchConfig};
use crate::error::ProviderError;
use crate::llm::LLMClient;

pub mod mock;
pub mod newsapi;
pub mod serpapi;
pub mod synthesis;

pub use newsapi::NewsApiBackend;
pub use serpapi::SerpApiBackend;

/// 从搜索结果中提取的花期状态信号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BloomStatusSignal {
    Active,
    Upcoming,
    Past,
    NotSuitable,
    #[default]
    Unknown,
}

impl std::fmt::Display for BloomStatusSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BloomStatusSignal::Active => write!(f, "active"),
            BloomStatusSignal::Upcoming => write!(f, "upcoming"),
            BloomStatusSignal::Past => write!(f, "past"),
            BloomStatusSignal::NotSuitable => write!(f, "not_suitable"),
            BloomStatusSignal::Unknown => write!(f, "unknown"),
        }
    }
}

/// 单条搜索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSource {
    pub title: String,
    pub snippet: String,
    pub link: String,
    /// 搜索源名称，例如 "SerpAPI"
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

/// Web调研结果
#[derive(Debug, Clone, PartialEq)]
pub struct WebResearch {
    pub summary: String,
    pub sources: Vec<SearchSource>,
    pub bloom_status: BloomStatusSignal,
}

#[async_trait]
pub trait WebResearchProvider: Send + Sync {
    async fn research(&self, region: &str, flower: &str) -> Result<WebResearch, ProviderError>;
}

/// 单个搜索后端
#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, region: &str, flower: &str) -> Result<Vec<SearchSource>, ProviderError>;
}

/// 并发查询所有已配置的搜索后端，可选地用LLM汇总结果
pub struct UnifiedWebResearch {
    backends: Vec<Box<dyn SearchBackend>>,
    summarizer: Option<LLMClient>,
}

const SUMMARY_SYSTEM_PROMPT: &str = "You are a research analyst specializing in environmental science and botanical research. You filter out noise, keep credible facts, and synthesize several sources into clear insights.";

impl UnifiedWebResearch {
    pub fn new(backends: Vec<Box<dyn SearchBackend>>) -> Self {
        Self {
            backends,
            summarizer: None,
        }
    }

    pub fn with_summarizer(mut self, client: LLMClient) -> Self {
        self.summarizer = Some(client);
        self
    }

    /// 根据配置装配搜索后端，KEY为空的后端不会被启用
    pub fn from_config(search: &SearchConfig, llm: &LLMConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(search.request_timeout())
            .build()?;

        let mut backends: Vec<Box<dyn SearchBackend>> = Vec::new();
        if search.has_serpapi() {
            backends.push(Box::new(SerpApiBackend::new(http.clone(), search)));
        }
        if search.has_newsapi() {
            backends.push(Box::new(NewsApiBackend::new(http, search)));
        }
        if backends.is_empty() {
            info!("⚠️ 未配置任何搜索API KEY，Web调研将被跳过");
        }

        let research = Self::new(backends);
        if llm.is_configured() {
            return Ok(research.with_summarizer(LLMClient::new(llm.clone())?));
        }
        Ok(research)
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    async fn summarize(&self, region: &str, flower: &str, sources: &[SearchSource]) -> String {
        let digest = synthesis::synthesize_search_results(sources);
        let Some(client) = self.summarizer.as_ref().filter(|_| !sources.is_empty()) else {
            return digest;
        };

        let user_prompt = synthesis::build_summary_prompt(region, flower, &digest);
        match client.prompt(SUMMARY_SYSTEM_PROMPT, &user_prompt).await {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            Ok(_) => digest,
            Err(e) => {
                warn!("⚠️ 搜索结果汇总失败，使用原始摘要: {}", e);
                digest
            }
        }
    }
}

#[async_trait]
impl WebResearchProvider for UnifiedWebResearch {
    async fn research(&self, region: &str, flower: &str) -> Result<WebResearch, ProviderError> {
        if self.backends.is_empty() {
            return Err(ProviderError::NotConfigured(
                "no search backend API key is set".to_string(),
            ));
        }

        let outcomes = join_all(
            self.backends
                .iter()
                .map(|backend| backend.search(region, flower)),
        )
        .await;

        let mut sources = Vec::new();
        let mut failures = Vec::new();
        for (backend, outcome) in self.backends.iter().zip(outcomes) {
            match outcome {
                Ok(results) => {
                    debug!("🔍 {} 返回 {} 条结果", backend.name(), results.len());
                    sources.extend(results);
                }
                Err(e) => {
                    warn!("⚠️ {} 搜索失败: {}", backend.name(), e);
                    failures.push(format!("{}: {}", backend.name(), e));
                }
            }
        }

        if failures.len() == self.backends.len() {
            return Err(ProviderError::Backend(failures.join("; ")));
        }

        let bloom_status = synthesis::extract_bloom_status(&sources);
        let summary = self.summarize(region, flower, &sources).await;
        info!(
            "✓ Web调研完成，共 {} 条结果，花期信号 {}",
            sources.len(),
            bloom_status
        );

        Ok(WebResearch {
            summary,
            sources,
            bloom_status,
        })
    }
}
