use crate::config::{Config, LLMProvider};
use crate::types::query::{BloomQuery, ClimateHint};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// 默认配置文件名，位于当前工作目录
pub const DEFAULT_CONFIG_FILE: &str = "bloomwatch.toml";

/// BloomWatch - 花期解释与Web调研的并发编排器
#[derive(Parser, Debug)]
#[command(name = "bloomwatch")]
#[command(
    about = "Explains when and how a flower blooms in a region by querying an LLM and web search concurrently, and merges the results into one JSON response."
)]
#[command(version)]
pub struct Args {
    /// 地区名称
    #[arg(short, long)]
    pub region: String,

    /// 花种名称，为空表示任意花种
    #[arg(short, long, default_value = "")]
    pub flower: String,

    /// 经度
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// 纬度
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// 查询日期 (YYYY-MM-DD)，默认当天
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// 当地气温（摄氏度）
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// 当地降水量（毫米）
    #[arg(long)]
    pub precipitation: Option<f64>,

    /// 气候描述
    #[arg(long)]
    pub climate_description: Option<String>,

    /// 使用确定性的模拟搜索结果
    #[arg(long)]
    pub mock_search: bool,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 参考数据文件路径
    #[arg(long)]
    pub reference_data: Option<PathBuf>,

    /// 整体超时时间（秒）
    #[arg(long)]
    pub timeout: Option<u64>,

    /// LLM Provider (openai, deepseek, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 模型名称
    #[arg(long)]
    pub llm_model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub llm_max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub llm_temperature: Option<f64>,

    /// 格式化输出JSON
    #[arg(long)]
    pub pretty: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(config_path) => Config::from_file(config_path)
                .with_context(|| format!("无法读取配置文件 {:?}", config_path))?,
            None => {
                let default_config_path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(DEFAULT_CONFIG_FILE);

                if default_config_path.exists() {
                    Config::from_file(&default_config_path).with_context(|| {
                        format!("无法读取默认配置文件 {:?}", default_config_path)
                    })?
                } else {
                    Config::default()
                }
            }
        };

        // 覆盖LLM配置
        if let Some(provider_str) = &self.llm_provider {
            config.llm.provider = provider_str
                .parse::<LLMProvider>()
                .map_err(anyhow::Error::msg)
                .context("--llm-provider 只支持 openai, deepseek, anthropic, ollama")?;
        }
        if let Some(llm_api_base_url) = &self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url.clone();
        }
        if let Some(llm_api_key) = &self.llm_api_key {
            config.llm.api_key = llm_api_key.clone();
        }
        if let Some(model) = &self.llm_model {
            config.llm.model = model.clone();
        }
        if let Some(max_tokens) = self.llm_max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.llm_temperature {
            config.llm.temperature = temperature;
        }

        // 其他配置
        if let Some(timeout) = self.timeout {
            config.orchestrator.timeout_seconds = timeout;
        }
        if let Some(reference_data) = &self.reference_data {
            config.reference_data_path = Some(reference_data.clone());
        }
        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }

    /// 将CLI参数转换为查询
    pub fn into_query(&self) -> BloomQuery {
        let mut query =
            BloomQuery::new(self.region.clone(), self.flower.clone()).with_mock_search(self.mock_search);

        if let (Some(lon), Some(lat)) = (self.lon, self.lat) {
            query = query.with_coordinates(lon, lat);
        }
        if let Some(date) = self.date {
            query = query.with_date(date);
        }

        let hint = ClimateHint {
            temperature: self.temperature,
            precipitation: self.precipitation,
            description: self.climate_description.clone(),
        };
        if !hint.is_empty() {
            query = query.with_climate_hint(hint);
        }
        query
    }
}
