use bloomwatch::config::Config;
use bloomwatch::types::ClimateHint;
use bloomwatch::{AbundanceLevel, BloomQuery, Orchestrator, ProviderStatus, ValidationError};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// 创建一个不依赖任何外部服务的配置文件
fn create_offline_config(dir: &Path, reference_data: Option<&Path>) -> Config {
    let mut content = String::from(
        r#"log_level = "warn"

[llm]
provider = "openai"
api_key = ""

[search]
serpapi_key = ""
newsapi_key = ""

[orchestrator]
timeout_seconds = 5
"#,
    );
    if let Some(path) = reference_data {
        content = format!("reference_data_path = {:?}\n{}", path, content);
    }

    let config_path = dir.join("bloomwatch.toml");
    fs::write(&config_path, content).unwrap();
    Config::from_file(&config_path).unwrap()
}

fn april() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 2).unwrap()
}

#[tokio::test]
async fn test_offline_mock_search_query() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_offline_config(temp_dir.path(), None);
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let response = orchestrator
        .handle(
            &BloomQuery::new("Kashmir Valley", "tulip")
                .with_date(april())
                .with_mock_search(true),
        )
        .await
        .unwrap();

    assert_eq!(response.flower.scientific_name, "Tulipa");
    assert_eq!(response.abundance_level, AbundanceLevel::High);
    assert_eq!(response.web_research.source_count, 2);
    assert_eq!(
        response.metadata.providers.explanation.status,
        ProviderStatus::Skipped
    );
    assert_eq!(response.metadata.providers.web_research.status, ProviderStatus::Ok);
    assert!(response.metadata.fallback);
    assert!(!response.metadata.llm_used);
    assert!(response.metadata.search_available);
    assert!(response.explanation_text.contains("tulip (Tulipa)"));
}

#[tokio::test]
async fn test_offline_query_without_search_keys() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_offline_config(temp_dir.path(), None);
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let response = orchestrator
        .handle(&BloomQuery::new("Kerala, India", "tulip").with_date(april()))
        .await
        .unwrap();

    assert_eq!(
        response.metadata.providers.web_research.status,
        ProviderStatus::Skipped
    );
    assert!(!response.compatibility.compatible);
    assert_eq!(response.abundance_level, AbundanceLevel::None);
    let warning = response.compatibility.warning_text.clone().unwrap();
    assert!(response.explanation_text.contains(&warning));
    assert!(response.notes.contains(&warning));
    let error = response.metadata.error.unwrap();
    assert!(error.contains("explanation: "));
    assert!(error.contains("web_research: "));
}

#[tokio::test]
async fn test_response_json_shape() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_offline_config(temp_dir.path(), None);
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let response = orchestrator
        .handle(
            &BloomQuery::new("Provence", "lavender")
                .with_date(april())
                .with_climate_hint(ClimateHint {
                    temperature: Some(14.0),
                    precipitation: None,
                    description: None,
                })
                .with_mock_search(true),
        )
        .await
        .unwrap();

    let json = serde_json::to_value(&response).unwrap();
    for field in [
        "region",
        "flower",
        "abundance_level",
        "season",
        "climate",
        "known_bloom_period",
        "notes",
        "compatibility",
        "explanation_text",
        "factors",
        "web_research",
        "metadata",
    ] {
        assert!(json.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(json["abundance_level"], "high");
    assert_eq!(json["flower"]["climate_class"], "temperate");
    assert_eq!(json["metadata"]["providers"]["explanation"]["status"], "skipped");
    assert_eq!(json["web_research"]["bloom_status"], "active");
    assert!(json["metadata"]["request_id"].as_str().unwrap().len() >= 32);
    assert!(json["metadata"]["error"].is_string());
    assert_eq!(json["climate"], "Temperature: 14°C, Precipitation: N/A");
}

#[tokio::test]
async fn test_custom_reference_data() {
    let temp_dir = TempDir::new().unwrap();
    let reference_path = temp_dir.path().join("flowers.toml");
    fs::write(
        &reference_path,
        r#"
[[flowers]]
common_name = "edelweiss"
scientific_name = "Leontopodium nivale"
climate_class = "cold"
canonical_bloom_period = "July to September"
"#,
    )
    .unwrap();
    let config = create_offline_config(temp_dir.path(), Some(&reference_path));
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let response = orchestrator
        .handle(&BloomQuery::new("Swiss Alps", "Edelweiss").with_date(april()))
        .await
        .unwrap();

    assert_eq!(response.flower.scientific_name, "Leontopodium nivale");
    assert_eq!(response.known_bloom_period, "July to September");
    // 四月不在 July to September 窗口内
    assert_eq!(response.abundance_level, AbundanceLevel::Low);
}

#[tokio::test]
async fn test_empty_region_is_a_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_offline_config(temp_dir.path(), None);
    let orchestrator = Orchestrator::from_config(&config).unwrap();

    let err = orchestrator
        .handle(&BloomQuery::new("", "rose"))
        .await
        .unwrap_err();
    assert_eq!(err, ValidationError::EmptyRegion);
}
