//! 确定性的模拟调研结果，不发起任何网络请求

use super::{synthesis, WebResearch, SearchSource};

pub const MOCK_SERP_SOURCE: &str = "Mock SerpAPI";
pub const MOCK_NEWS_SOURCE: &str = "Mock NewsAPI";

pub fn mock_research(region: &str, flower: &str) -> WebResearch {
    let title_flower = title_case(flower);
    let sources = vec![
        SearchSource {
            title: format!("{} Blooming Patterns in {}", title_flower, region),
            snippet: format!(
                "Recent observations show {} in full bloom across {}, with temperature and precipitation driving the timing.",
                flower, region
            ),
            link: "https://example.com/study1".to_string(),
            source: MOCK_SERP_SOURCE.to_string(),
            published_at: None,
        },
        SearchSource {
            title: format!("Climate Impact on {} Growth", title_flower),
            snippet: format!(
                "Climate change is affecting {} bloom timing in {}, with earlier flowering observed.",
                flower, region
            ),
            link: "https://example.com/news1".to_string(),
            source: MOCK_NEWS_SOURCE.to_string(),
            published_at: None,
        },
    ];

    let summary = format!(
        "Recent research indicates that {} blooming in {} is responding to climate variations, with temperature and precipitation playing key roles. Earlier bloom times have been observed in recent years.",
        flower, region
    );
    let bloom_status = synthesis::extract_bloom_status(&sources);

    WebResearch {
        summary,
        sources,
        bloom_status,
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
