use regex::Regex;
use std::sync::LazyLock;

use super::{BloomStatusSignal, SearchSource};

pub const NO_RESEARCH_SUMMARY: &str = "No recent web research available.";

/// 摘要最多包含的结果数
const DIGEST_LIMIT: usize = 5;

struct SignalPattern {
    signal: BloomStatusSignal,
    pattern: Regex,
}

// 顺序即平票时的优先级
static SIGNAL_PATTERNS: LazyLock<Vec<SignalPattern>> = LazyLock::new(|| {
    [
        (
            BloomStatusSignal::NotSuitable,
            r"(?i)\b(not suitable|unsuitable|cannot (?:grow|survive)|can't (?:grow|survive)|does not grow|too (?:hot|warm|humid) for)\b",
        ),
        (
            BloomStatusSignal::Active,
            r"(?i)\b(in full bloom|full bloom|peak bloom|blooming now|now blooming|in bloom|currently blooming|are blooming|is blooming|burst into bloom)\b",
        ),
        (
            BloomStatusSignal::Upcoming,
            r"(?i)\b(expected to bloom|set to bloom|will bloom|about to bloom|upcoming bloom|bloom forecast|buds? forming|early buds)\b",
        ),
        (
            BloomStatusSignal::Past,
            r"(?i)\b(past peak|bloom(?:ing)? (?:has )?ended|season (?:has )?ended|finished blooming|wilt(?:ed|ing)|faded)\b",
        ),
    ]
    .into_iter()
    .filter_map(|(signal, pattern)| {
        Regex::new(pattern)
            .ok()
            .map(|pattern| SignalPattern { signal, pattern })
    })
    .collect()
});

/// 统计标题与摘要中各信号的命中次数，取最多者
pub fn extract_bloom_status(sources: &[SearchSource]) -> BloomStatusSignal {
    let mut best = (BloomStatusSignal::Unknown, 0usize);

    for candidate in SIGNAL_PATTERNS.iter() {
        let hits: usize = sources
            .iter()
            .map(|s| {
                candidate.pattern.find_iter(&s.title).count()
                    + candidate.pattern.find_iter(&s.snippet).count()
            })
            .sum();
        if hits > best.1 {
            best = (candidate.signal, hits);
        }
    }

    best.0
}

/// 将搜索结果整理为编号摘要
pub fn synthesize_search_results(sources: &[SearchSource]) -> String {
    if sources.is_empty() {
        return NO_RESEARCH_SUMMARY.to_string();
    }

    sources
        .iter()
        .take(DIGEST_LIMIT)
        .enumerate()
        .map(|(i, s)| {
            let title = if s.title.is_empty() {
                "No title"
            } else {
                s.title.as_str()
            };
            let snippet = if s.snippet.is_empty() {
                "No description"
            } else {
                s.snippet.as_str()
            };
            format!("{}. [{}] {}: {}", i + 1, s.source, title, snippet)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_summary_prompt(region: &str, flower: &str, digest: &str) -> String {
    format!(
        "Analyze and synthesize the following web search results about {} blooming patterns in {}.\n\n\
Search Results:\n{}\n\n\
Extract the key facts about bloom timing, climate conditions and ecological factors, note any recent news or unusual patterns, \
and write a concise factual summary of 100-150 words.",
        flower, region, digest
    )
}
