use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{SearchBackend, SearchSource};
use crate::config::SearchConfig;
use crate::error::ProviderError;

pub const SOURCE_NAME: &str = "SerpAPI";

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

/// Google 通用搜索（SerpAPI）
#[derive(Debug, Clone)]
pub struct SerpApiBackend {
    client: Client,
    api_key: String,
    base_url: String,
    max_results: usize,
}

impl SerpApiBackend {
    pub fn new(client: Client, config: &SearchConfig) -> Self {
        Self {
            client,
            api_key: config.serpapi_key.clone(),
            base_url: config.serpapi_base_url.clone(),
            max_results: config.max_results,
        }
    }

    pub fn build_query(region: &str, flower: &str) -> String {
        format!("{} bloom patterns {} ecology phenology", flower, region)
    }

    fn parse(body: SerpApiResponse, max_results: usize) -> Result<Vec<SearchSource>, ProviderError> {
        if let Some(error) = body.error {
            return Err(ProviderError::Backend(error));
        }
        Ok(body
            .organic_results
            .into_iter()
            .take(max_results)
            .map(|r| SearchSource {
                title: r.title,
                snippet: r.snippet,
                link: r.link,
                source: SOURCE_NAME.to_string(),
                published_at: None,
            })
            .collect())
    }
}

#[async_trait]
impl SearchBackend for SerpApiBackend {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn search(&self, region: &str, flower: &str) -> Result<Vec<SearchSource>, ProviderError> {
        let query = Self::build_query(region, flower);
        debug!("Searching SerpAPI for {}", query);

        let num = self.max_results.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", "google"),
                ("q", query.as_str()),
                ("num", num.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Backend(format!(
                "SerpAPI responded with {}",
                response.status()
            )));
        }

        let body: SerpApiResponse = response.json().await?;
        Self::parse(body, self.max_results)
    }
}
