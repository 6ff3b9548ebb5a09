use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 经纬度坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }

    pub fn is_southern_hemisphere(&self) -> bool {
        self.latitude < 0.0
    }
}

/// 调用方提供的气候信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateHint {
    /// 摄氏度
    #[serde(default)]
    pub temperature: Option<f64>,
    /// 毫米
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ClimateHint {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.precipitation.is_none() && self.description.is_none()
    }

    /// 格式化为可读文本
    pub fn describe(&self) -> String {
        let temperature = self
            .temperature
            .map(|t| format!("{}°C", t))
            .unwrap_or_else(|| "N/A".to_string());
        let precipitation = self
            .precipitation
            .map(|p| format!("{}mm", p))
            .unwrap_or_else(|| "N/A".to_string());

        let mut text = format!(
            "Temperature: {}, Precipitation: {}",
            temperature, precipitation
        );
        if let Some(description) = self.description.as_deref()
            && !description.trim().is_empty()
        {
            text.push_str(&format!(" ({})", description.trim()));
        }
        text
    }
}

/// 一次花期查询
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BloomQuery {
    pub region: String,
    /// 为空时表示任意花种
    #[serde(default)]
    pub flower: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub climate_hint: Option<ClimateHint>,
    #[serde(default)]
    pub as_of_date: Option<NaiveDate>,
    #[serde(default)]
    pub use_mock_search: bool,
}

impl BloomQuery {
    pub fn new(region: impl Into<String>, flower: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            flower: flower.into(),
            ..Default::default()
        }
    }

    pub fn with_coordinates(mut self, longitude: f64, latitude: f64) -> Self {
        self.coordinates = Some(Coordinates::new(longitude, latitude));
        self
    }

    pub fn with_climate_hint(mut self, hint: ClimateHint) -> Self {
        self.climate_hint = Some(hint);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.as_of_date = Some(date);
        self
    }

    pub fn with_mock_search(mut self, use_mock_search: bool) -> Self {
        self.use_mock_search = use_mock_search;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.region.trim().is_empty() {
            return Err(ValidationError::EmptyRegion);
        }
        if let Some(coordinates) = self.coordinates
            && !coordinates.is_valid()
        {
            return Err(ValidationError::InvalidCoordinates {
                longitude: coordinates.longitude,
                latitude: coordinates.latitude,
            });
        }
        Ok(())
    }

    pub fn region(&self) -> &str {
        self.region.trim()
    }

    pub fn flower(&self) -> &str {
        self.flower.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_region() {
        assert_eq!(
            BloomQuery::new("   ", "tulip").validate(),
            Err(ValidationError::EmptyRegion)
        );
        assert!(BloomQuery::new("Kashmir Valley", "").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_coordinates() {
        let query = BloomQuery::new("Kerala", "lotus").with_coordinates(76.2, 120.0);
        assert!(matches!(
            query.validate(),
            Err(ValidationError::InvalidCoordinates { .. })
        ));

        let query = BloomQuery::new("Kerala", "lotus").with_coordinates(f64::NAN, 10.0);
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let query: BloomQuery = serde_json::from_str(r#"{"region": "Kerala, India"}"#).unwrap();
        assert_eq!(query.region(), "Kerala, India");
        assert_eq!(query.flower(), "");
        assert!(!query.use_mock_search);
        assert!(query.coordinates.is_none());
    }

    #[test]
    fn test_deserialize_full_payload() {
        let query: BloomQuery = serde_json::from_str(
            r#"{
                "region": "Cape Town",
                "flower": "Protea",
                "coordinates": {"longitude": 18.42, "latitude": -33.92},
                "climate_hint": {"temperature": 21.5, "description": "dry summer"},
                "as_of_date": "2025-01-15",
                "use_mock_search": true
            }"#,
        )
        .unwrap();

        assert!(query.coordinates.unwrap().is_southern_hemisphere());
        assert_eq!(
            query.as_of_date,
            Some(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        );
        assert_eq!(query.climate_hint.unwrap().precipitation, None);
        assert!(query.use_mock_search);
    }

    #[test]
    fn test_climate_hint_describe() {
        let hint = ClimateHint {
            temperature: Some(18.0),
            precipitation: Some(40.0),
            description: Some("mild".to_string()),
        };
        assert_eq!(
            hint.describe(),
            "Temperature: 18°C, Precipitation: 40mm (mild)"
        );
        assert!(ClimateHint::default().is_empty());
    }
}
