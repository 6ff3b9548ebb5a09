use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{SearchBackend, SearchSource};
use crate::config::SearchConfig;
use crate::error::ProviderError;

pub const SOURCE_NAME: &str = "NewsAPI";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

/// 新闻搜索（NewsAPI），只检索最近 `news_lookback_days` 天的英文报道
#[derive(Debug, Clone)]
pub struct NewsApiBackend {
    client: Client,
    api_key: String,
    base_url: String,
    max_results: usize,
    lookback_days: i64,
}

impl NewsApiBackend {
    pub fn new(client: Client, config: &SearchConfig) -> Self {
        Self {
            client,
            api_key: config.newsapi_key.clone(),
            base_url: config.newsapi_base_url.clone(),
            max_results: config.max_results,
            lookback_days: config.news_lookback_days,
        }
    }

    pub fn build_query(region: &str, flower: &str) -> String {
        format!("{} blooming {} climate agriculture", flower, region)
    }

    fn parse(body: NewsApiResponse, max_results: usize) -> Result<Vec<SearchSource>, ProviderError> {
        if body.status == "error" {
            return Err(ProviderError::Backend(
                body.message
                    .unwrap_or_else(|| "NewsAPI returned an error".to_string()),
            ));
        }
        Ok(body
            .articles
            .into_iter()
            .take(max_results)
            .map(|a| SearchSource {
                title: a.title.unwrap_or_default(),
                snippet: a.description.unwrap_or_default(),
                link: a.url.unwrap_or_default(),
                source: SOURCE_NAME.to_string(),
                published_at: a.published_at,
            })
            .collect())
    }
}

/// 检索起始日期，回溯天数超出可表示范围时返回错误
fn lookback_start(now: DateTime<Utc>, lookback_days: i64) -> Result<String, ProviderError> {
    TimeDelta::try_days(lookback_days)
        .and_then(|lookback| now.checked_sub_signed(lookback))
        .map(|from| from.format("%Y-%m-%d").to_string())
        .ok_or_else(|| {
            ProviderError::Backend(format!(
                "news_lookback_days out of range: {}",
                lookback_days
            ))
        })
}

#[async_trait]
impl SearchBackend for NewsApiBackend {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn search(&self, region: &str, flower: &str) -> Result<Vec<SearchSource>, ProviderError> {
        let query = Self::build_query(region, flower);
        let from = lookback_start(Utc::now(), self.lookback_days)?;
        debug!("Searching NewsAPI for {} since {}", query, from);

        let page_size = self.max_results.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .header("X-Api-Key", &self.api_key)
            .header("User-Agent", "bloomwatch")
            .query(&[
                ("q", query.as_str()),
                ("from", from.as_str()),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body: NewsApiResponse = response.json().await?;
        if !status.is_success() && body.status != "error" {
            return Err(ProviderError::Backend(format!(
                "NewsAPI responded with {}",
                status
            )));
        }
        Self::parse(body, self.max_results)
    }
}
