//! 花期查询编排器：并发调用解释与Web调研，在同一截止时间内合并结果

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agents::explanation::{ExplanationProvider, ExplanationRequest, LlmExplanationProvider};
use crate::agents::web_search::{UnifiedWebResearch, WebResearchProvider, mock};
use crate::compatibility;
use crate::config::Config;
use crate::error::{ProviderError, ValidationError};
use crate::reference::{FlowerProfile, ReferenceData};
use crate::types::provider_result::ProviderResult;
use crate::types::query::BloomQuery;
use crate::types::response::BloomResponse;
use crate::utils::season::SeasonContext;

pub mod fallback;
pub mod merge;


/// 约三十年
const FAR_FUTURE_SECS: u64 = 86_400 * 365 * 30;

/// 编排器本身无状态，可在多个查询间共享
#[derive(Clone)]
pub struct Orchestrator {
    reference: Arc<ReferenceData>,
    explainer: Arc<dyn ExplanationProvider>,
    researcher: Arc<dyn WebResearchProvider>,
    timeout: Duration,
}

impl Orchestrator {
    pub fn new(
        reference: Arc<ReferenceData>,
        explainer: Arc<dyn ExplanationProvider>,
        researcher: Arc<dyn WebResearchProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            reference,
            explainer,
            researcher,
            timeout,
        }
    }

    /// 按配置装配参考数据与两个Provider
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let reference = Arc::new(config.load_reference_data()?);
        let explainer = Arc::new(LlmExplanationProvider::from_config(&config.llm)?);
        let researcher = Arc::new(UnifiedWebResearch::from_config(
            &config.search,
            &config.llm,
        )?);
        info!(
            "📚 已加载 {} 条花种参考数据，超时 {}s",
            reference.flower_count(),
            config.orchestrator.timeout_seconds
        );
        Ok(Self::new(
            reference,
            explainer,
            researcher,
            config.orchestrator.timeout(),
        ))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn resolve_flower(&self, flower: &str) -> FlowerProfile {
        self.reference.resolve_flower(flower)
    }

    /// 处理一次查询。只有校验错误会返回Err，Provider的失败都被吸收进响应
    pub async fn handle(&self, query: &BloomQuery) -> Result<BloomResponse, ValidationError> {
        let started = std::time::Instant::now();
        let request_id = Uuid::new_v4().to_string();

        query.validate()?;
        let region = query.region();
        info!(%request_id, region, flower = query.flower(), "📥 收到花期查询");

        let profile = self.resolve_flower(query.flower());
        let verdict = compatibility::classify(&profile, region, self.reference.keywords());
        if !verdict.compatible {
            warn!(%request_id, "⚠️ 气候不兼容: {} / {}", profile.common_name, region);
        }

        let as_of_date = query
            .as_of_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());
        let season = SeasonContext::derive(as_of_date, query.coordinates.as_ref());

        let request = ExplanationRequest {
            region: region.to_string(),
            flower: profile.clone(),
            compatibility: verdict.clone(),
            season: season.label(),
            as_of_date,
            coordinates: query.coordinates,
            climate: query.climate_hint.clone(),
        };

        let deadline = joint_deadline(Instant::now(), self.timeout);
        info!(%request_id, mock_search = query.use_mock_search, "🚀 已分发解释与Web调研");

        let explanation = bounded(deadline, self.explainer.explain(&request));
        let research = bounded(deadline, async {
            if query.use_mock_search {
                Ok(mock::mock_research(region, &profile.common_name))
            } else {
                self.researcher.research(region, &profile.common_name).await
            }
        });
        let (explanation, research) = tokio::join!(explanation, research);

        debug!(
            %request_id,
            explanation = %explanation.status,
            web_research = %research.status,
            "Provider调用结束"
        );

        let explanation = merge::guard_explanation(explanation, &verdict);
        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        let response = merge::merge(
            merge::MergeContext {
                request_id: request_id.clone(),
                region,
                profile: &profile,
                verdict: &verdict,
                season: &season,
                climate: query.climate_hint.as_ref(),
            },
            explanation,
            research,
            processing_time_ms,
        );
        info!(
            %request_id,
            abundance = %response.abundance_level,
            fallback = response.metadata.fallback,
            "🔀 结果已合并"
        );

        if let Some(error) = response.metadata.error.as_deref() {
            warn!(%request_id, "⚠️ 降级响应: {}", error);
        }
        info!(%request_id, "✅ 返回响应，耗时 {:.1}ms", processing_time_ms);
        Ok(response)
    }
}

/// 超时配置过大而无法表示时，退化为一个足够远的截止时间
fn joint_deadline(now: Instant, timeout: Duration) -> Instant {
    now.checked_add(timeout)
        .unwrap_or_else(|| now + Duration::from_secs(FAR_FUTURE_SECS))
}

/// 在共享截止时间内等待Provider，超时的future会被直接丢弃
async fn bounded<T, F>(deadline: Instant, call: F) -> ProviderResult<T>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    let started = Instant::now();
    let outcome = timeout_at(deadline, call).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match outcome {
        Ok(result) => ProviderResult::settle(result, elapsed_ms),
        Err(_) => ProviderResult::timeout(elapsed_ms),
    }
}
