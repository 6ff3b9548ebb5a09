use regex::Regex;
use std::sync::LazyLock;

use super::fallback;
use crate::agents::explanation::Explanation;
use crate::agents::web_search::WebResearch;
use crate::compatibility::CompatibilityVerdict;
use crate::error::ProviderError;
use crate::reference::FlowerProfile;
use crate::types::provider_result::ProviderResult;
use crate::types::query::ClimateHint;
use crate::types::response::{
    AbundanceLevel, BloomResponse, FlowerView, ProviderReports, ResponseMetadata,
    WebResearchView,
};
use crate::utils::season::SeasonContext;

/// 响应中保留的来源数
const TOP_SOURCES: usize = 3;

/// 否定词向前查找的词数
const NEGATION_WINDOW: usize = 5;

static FORBIDDEN_CLAIMS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(thriv\w*|flourish\w*|naturally\s+bloom\w*)").ok()
});

static NEGATORS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(not|cannot|never|unable to|unlikely to|fails? to|no longer|(?:can|won|doesn|don|isn|aren|wouldn|couldn)['’]t)\b",
    )
    .ok()
});

/// 返回第一处未被否定的"生长繁茂"说法
fn find_affirmative_claim(text: &str) -> Option<&str> {
    let claims = FORBIDDEN_CLAIMS.as_ref()?;
    claims
        .find_iter(text)
        .find(|claim| !is_negated(&text[..claim.start()]))
        .map(|claim| claim.as_str())
}

/// 只看同一句中紧邻的前几个词
fn is_negated(prefix: &str) -> bool {
    let clause = prefix.rsplit(['.', ';', '!', '?']).next().unwrap_or(prefix);
    let mut words: Vec<&str> = clause
        .split_whitespace()
        .rev()
        .take(NEGATION_WINDOW)
        .collect();
    words.reverse();
    NEGATORS
        .as_ref()
        .is_some_and(|negators| negators.is_match(&words.join(" ")))
}

/// 不兼容时拦截肯定"生长繁茂"的文本（否定句放行），通过的文本补上警告前缀
pub fn guard_explanation(
    result: ProviderResult<Explanation>,
    verdict: &CompatibilityVerdict,
) -> ProviderResult<Explanation> {
    let Some(warning) = verdict.warning_text.as_deref().filter(|_| !verdict.compatible) else {
        return result;
    };
    let Some(explanation) = result.ok_value() else {
        return result;
    };

    if let Some(claim) = find_affirmative_claim(&explanation.text) {
        let violation = ProviderError::ConstraintViolation(format!(
            "explanation claims \"{}\" in an incompatible climate",
            claim
        ));
        return result.reject(violation.to_string());
    }

    if explanation.text.contains(warning) {
        return result;
    }

    let elapsed_ms = result.elapsed_ms;
    let text = format!("{}\n\n{}", warning, explanation.text);
    let used_real_backend = explanation.used_real_backend;
    ProviderResult::ok(
        Explanation {
            text,
            used_real_backend,
        },
        elapsed_ms,
    )
}

/// 合并所需的同步上下文
pub struct MergeContext<'a> {
    pub request_id: String,
    pub region: &'a str,
    pub profile: &'a FlowerProfile,
    pub verdict: &'a CompatibilityVerdict,
    pub season: &'a SeasonContext,
    pub climate: Option<&'a ClimateHint>,
}

pub fn merge(
    ctx: MergeContext<'_>,
    explanation: ProviderResult<Explanation>,
    research: ProviderResult<WebResearch>,
    processing_time_ms: f64,
) -> BloomResponse {
    let season_label = ctx.season.label();

    let explanation_text = match explanation.ok_value() {
        Some(explanation) => explanation.text.clone(),
        None => fallback::fallback_explanation(ctx.profile, ctx.region, &season_label, ctx.verdict),
    };

    let abundance_level = match research.ok_value() {
        Some(research) => AbundanceLevel::from_signal(research.bloom_status),
        None => fallback::heuristic_abundance(ctx.profile, ctx.verdict, ctx.season),
    };

    let web_research = research
        .ok_value()
        .map(|research| WebResearchView {
            summary: research.summary.clone(),
            source_count: research.sources.len(),
            sources: research.sources.iter().take(TOP_SOURCES).cloned().collect(),
            bloom_status: research.bloom_status,
        })
        .unwrap_or_else(WebResearchView::empty);

    let errors: Vec<String> = [
        ("explanation", &explanation.error_message, explanation.is_ok()),
        ("web_research", &research.error_message, research.is_ok()),
    ]
    .into_iter()
    .filter(|(_, _, ok)| !ok)
    .map(|(name, message, _)| {
        format!(
            "{}: {}",
            name,
            message.as_deref().unwrap_or("no result")
        )
    })
    .collect();

    let metadata = ResponseMetadata {
        request_id: ctx.request_id,
        timestamp: chrono::Utc::now().to_rfc3339(),
        processing_time_ms,
        llm_used: explanation
            .ok_value()
            .is_some_and(|explanation| explanation.used_real_backend),
        search_available: research
            .ok_value()
            .is_some_and(|research| !research.sources.is_empty()),
        fallback: !errors.is_empty(),
        error: if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        },
        providers: ProviderReports {
            explanation: explanation.report(),
            web_research: research.report(),
        },
    };

    BloomResponse {
        region: ctx.region.to_string(),
        flower: FlowerView::from(ctx.profile),
        abundance_level,
        season: season_label,
        climate: fallback::climate_summary(ctx.verdict, ctx.climate),
        known_bloom_period: ctx.profile.canonical_bloom_period.clone(),
        notes: fallback::notes(ctx.profile, ctx.region, ctx.verdict, abundance_level),
        compatibility: ctx.verdict.clone(),
        explanation_text,
        factors: fallback::factors(ctx.profile, ctx.verdict, ctx.climate),
        web_research,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negated_claims_are_not_affirmative() {
        assert_eq!(
            find_affirmative_claim("Tulips cannot thrive in Kerala's humid tropical heat."),
            None
        );
        assert_eq!(
            find_affirmative_claim("They do not naturally bloom here, and won't flourish indoors either."),
            None
        );
        assert_eq!(
            find_affirmative_claim("Tulips don’t thrive in the lowlands."),
            None
        );
    }

    #[test]
    fn test_affirmative_claims_are_found() {
        assert_eq!(
            find_affirmative_claim("Tulips are thriving across Kerala this spring."),
            Some("thriving")
        );
        // 否定只作用于所在句子
        assert_eq!(
            find_affirmative_claim("Roses are not native here. Tulips flourish in the hills."),
            Some("flourish")
        );
        assert_eq!(
            find_affirmative_claim("Nothing stops them: tulips naturally bloom by the coast."),
            Some("naturally bloom")
        );
    }
}
