use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// 单个Provider调用的终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Ok,
    Timeout,
    Error,
    Skipped,
}

impl std::fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderStatus::Ok => write!(f, "ok"),
            ProviderStatus::Timeout => write!(f, "timeout"),
            ProviderStatus::Error => write!(f, "error"),
            ProviderStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// 一次Provider调用的结果，由编排器独占
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult<T> {
    pub status: ProviderStatus,
    pub value: Option<T>,
    pub error_message: Option<String>,
    pub elapsed_ms: u64,
}

impl<T> ProviderResult<T> {
    pub fn ok(value: T, elapsed_ms: u64) -> Self {
        Self {
            status: ProviderStatus::Ok,
            value: Some(value),
            error_message: None,
            elapsed_ms,
        }
    }

    pub fn error(message: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            status: ProviderStatus::Error,
            value: None,
            error_message: Some(message.into()),
            elapsed_ms,
        }
    }

    pub fn timeout(elapsed_ms: u64) -> Self {
        Self {
            status: ProviderStatus::Timeout,
            value: None,
            error_message: Some(format!("timed out after {}ms", elapsed_ms)),
            elapsed_ms,
        }
    }

    pub fn skipped(message: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            status: ProviderStatus::Skipped,
            value: None,
            error_message: Some(message.into()),
            elapsed_ms,
        }
    }

    /// 将Provider的返回值归入对应终态
    pub fn settle(outcome: Result<T, ProviderError>, elapsed_ms: u64) -> Self {
        match outcome {
            Ok(value) => Self::ok(value, elapsed_ms),
            Err(err) if err.is_not_configured() => Self::skipped(err.to_string(), elapsed_ms),
            Err(err) => Self::error(err.to_string(), elapsed_ms),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ProviderStatus::Ok
    }

    /// 仅在状态为ok时返回值
    pub fn ok_value(&self) -> Option<&T> {
        match self.status {
            ProviderStatus::Ok => self.value.as_ref(),
            _ => None,
        }
    }

    /// 在保留耗时的前提下将结果降级为error
    pub fn reject(self, message: impl Into<String>) -> Self {
        Self::error(message, self.elapsed_ms)
    }

    pub fn report(&self) -> ProviderReport {
        ProviderReport {
            status: self.status,
            elapsed_ms: self.elapsed_ms,
            error: self.error_message.clone(),
        }
    }
}

/// 输出到响应元数据中的Provider诊断信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderReport {
    pub status: ProviderStatus,
    pub elapsed_ms: u64,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_maps_not_configured_to_skipped() {
        let result: ProviderResult<String> = ProviderResult::settle(
            Err(ProviderError::NotConfigured("no api key".to_string())),
            3,
        );
        assert_eq!(result.status, ProviderStatus::Skipped);
        assert!(result.value.is_none());
        assert!(result.error_message.unwrap().contains("no api key"));
    }

    #[test]
    fn test_settle_maps_backend_error_to_error() {
        let result: ProviderResult<String> =
            ProviderResult::settle(Err(ProviderError::Backend("503".to_string())), 12);
        assert_eq!(result.status, ProviderStatus::Error);
        assert_eq!(result.elapsed_ms, 12);
    }

    #[test]
    fn test_timeout_records_message() {
        let result: ProviderResult<String> = ProviderResult::timeout(30_000);
        assert_eq!(result.status, ProviderStatus::Timeout);
        assert_eq!(
            result.error_message.as_deref(),
            Some("timed out after 30000ms")
        );
        assert!(result.ok_value().is_none());
    }

    #[test]
    fn test_reject_keeps_elapsed() {
        let result = ProviderResult::ok("text".to_string(), 42).reject("bad claim");
        assert_eq!(result.status, ProviderStatus::Error);
        assert_eq!(result.elapsed_ms, 42);
        assert!(result.value.is_none());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProviderStatus::Timeout).unwrap(),
            "\"timeout\""
        );
        assert_eq!(ProviderStatus::Skipped.to_string(), "skipped");
    }
}
