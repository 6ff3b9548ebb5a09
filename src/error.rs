//! 领域错误定义

use thiserror::Error;

/// 查询校验错误，编排器唯一会向调用方返回的错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("region must not be empty")]
    EmptyRegion,

    #[error("coordinates out of range: longitude={longitude}, latitude={latitude}")]
    InvalidCoordinates { longitude: f64, latitude: f64 },
}

/// Provider调用错误，只会被记录到ProviderResult中，不会向上传播
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// 未配置（例如缺少API KEY），对应 `skipped` 状态
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    #[error("backend request failed: {0}")]
    Backend(String),

    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    /// 生成内容违反了气候兼容性约束
    #[error("compatibility constraint violated: {0}")]
    ConstraintViolation(String),
}

impl ProviderError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, ProviderError::NotConfigured(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::InvalidResponse(err.to_string())
        } else {
            ProviderError::Backend(err.to_string())
        }
    }
}
