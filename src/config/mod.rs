use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use crate::reference::ReferenceData;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// Web搜索配置
    pub search: SearchConfig,

    /// 编排器配置
    pub orchestrator: OrchestratorConfig,

    /// 花种与地区参考数据文件，不设置时使用内置参考表
    pub reference_data_path: Option<PathBuf>,

    /// 日志级别，RUST_LOG 优先
    pub log_level: String,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY，为空时不调用LLM
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 模型名称
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,
}

/// Web搜索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// SerpAPI KEY，为空时不启用
    pub serpapi_key: String,

    /// NewsAPI KEY，为空时不启用
    pub newsapi_key: String,

    pub serpapi_base_url: String,

    pub newsapi_base_url: String,

    /// 每个搜索源的最大结果数
    pub max_results: usize,

    /// 单次HTTP请求超时时间（秒）
    pub request_timeout_seconds: u64,

    /// NewsAPI 回溯天数
    pub news_lookback_days: i64,
}

/// 编排器配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// 单次查询的整体截止时间（秒），两个Provider共享
    pub timeout_seconds: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 加载参考数据，未配置文件时使用内置参考表
    pub fn load_reference_data(&self) -> Result<ReferenceData> {
        match &self.reference_data_path {
            Some(path) => ReferenceData::from_file(path),
            None => Ok(ReferenceData::builtin()),
        }
    }

    /// 实际生效的日志过滤级别
    pub fn effective_log_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            self.log_level.as_str()
        }
    }
}

impl LLMConfig {
    /// Ollama 本地部署无需KEY
    pub fn is_configured(&self) -> bool {
        self.provider == LLMProvider::Ollama || !self.api_key.trim().is_empty()
    }
}

impl SearchConfig {
    pub fn has_serpapi(&self) -> bool {
        !self.serpapi_key.trim().is_empty()
    }

    pub fn has_newsapi(&self) -> bool {
        !self.newsapi_key.trim().is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl OrchestratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            orchestrator: OrchestratorConfig::default(),
            reference_data_path: None,
            log_level: String::from("info"),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("BLOOMWATCH_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model: String::from("gpt-4o-mini"),
            max_tokens: 1024,
            temperature: 0.7,
            retry_attempts: 2,
            retry_delay_ms: 1000,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            serpapi_key: std::env::var("SERPAPI_API_KEY").unwrap_or_default(),
            newsapi_key: std::env::var("NEWSAPI_API_KEY").unwrap_or_default(),
            serpapi_base_url: String::from("https://serpapi.com/search.json"),
            newsapi_base_url: String::from("https://newsapi.org/v2/everything"),
            max_results: 5,
            request_timeout_seconds: 15,
            news_lookback_days: 30,
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
