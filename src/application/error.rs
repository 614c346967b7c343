//! 应用层错误定义
//!
//! 统一的命令错误类型，最终都会转换成 [`CommandResult::Error`]，
//! 不会以异常形式穿透到宿主。

use serde_json::json;
use thiserror::Error;

use crate::application::commands::CommandResult;
use crate::application::ports::SdkError;

/// 错误码定义
pub mod codes {
    pub const SDK_NOT_INITIALIZED: &str = "SDK_NOT_INITIALIZED";
    pub const INVALID_ARGUMENTS: &str = "INVALID_ARGUMENTS";
    pub const INVALID_PTZ_COMMAND: &str = "INVALID_PTZ_COMMAND";
    pub const INVALID_PTZ_ACTION: &str = "INVALID_PTZ_ACTION";
    pub const UNSUPPORTED: &str = "UNSUPPORTED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

    pub const INIT_SDK_ERROR: &str = "INIT_SDK_ERROR";
    pub const ACCESS_TOKEN_ERROR: &str = "ACCESS_TOKEN_ERROR";
    pub const SERVER_URL_ERROR: &str = "SERVER_URL_ERROR";
    pub const DEVICE_INFO_ERROR: &str = "DEVICE_INFO_ERROR";
    pub const DEVICE_LIST_ERROR: &str = "DEVICE_LIST_ERROR";
    pub const ADD_DEVICE_ERROR: &str = "ADD_DEVICE_ERROR";
    pub const DELETE_DEVICE_ERROR: &str = "DELETE_DEVICE_ERROR";
    pub const PROBE_DEVICE_ERROR: &str = "PROBE_DEVICE_ERROR";
    pub const AREA_LIST_ERROR: &str = "AREA_LIST_ERROR";
    pub const VIDEO_LEVEL_ERROR: &str = "VIDEO_LEVEL_ERROR";
    pub const PTZ_ERROR: &str = "PTZ_ERROR";
    pub const NET_DEVICE_ERROR: &str = "NET_DEVICE_ERROR";
    pub const VOICE_TALK_ERROR: &str = "VOICE_TALK_ERROR";
    pub const SEARCH_RECORD_ERROR: &str = "SEARCH_RECORD_ERROR";
    pub const SEARCH_DEVICE_RECORD_ERROR: &str = "SEARCH_DEVICE_RECORD_ERROR";
    pub const LOGIN_PAGE_ERROR: &str = "LOGIN_PAGE_ERROR";
    pub const LOGOUT_ERROR: &str = "LOGOUT_ERROR";
    pub const PLAYER_ERROR: &str = "PLAYER_ERROR";
}

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// SDK 尚未初始化
    #[error("SDK not initialized, call initSDK first")]
    SdkNotInitialized,

    /// 参数校验失败（仅用于显式校验的字段，例如云台指令）
    #[error("{message}")]
    InvalidArgument { code: &'static str, message: String },

    /// 外部 SDK 错误
    #[error("{source}")]
    Sdk {
        code: &'static str,
        #[source]
        source: SdkError,
    },

    /// 当前 SDK 不支持的功能
    #[error("{0} is not supported by the current SDK")]
    Unsupported(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// 包装 SDK 错误，未初始化单独归类
    pub fn sdk(code: &'static str, source: SdkError) -> Self {
        match source {
            SdkError::NotInitialized => Self::SdkNotInitialized,
            source => Self::Sdk { code, source },
        }
    }

    /// 用于 `map_err` 的闭包
    pub fn sdk_with(code: &'static str) -> impl FnOnce(SdkError) -> Self {
        move |source| Self::sdk(code, source)
    }

    pub fn invalid(code: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            code,
            message: message.into(),
        }
    }

    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported(feature.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// 错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::SdkNotInitialized => codes::SDK_NOT_INITIALIZED,
            Self::InvalidArgument { code, .. } => code,
            Self::Sdk { code, .. } => code,
            Self::Unsupported(_) => codes::UNSUPPORTED,
            Self::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// 转换为宿主可见的失败结果
    pub fn into_command_result(self) -> CommandResult {
        let details = match &self {
            Self::Sdk { source, .. } => source.vendor_code().map(|code| json!({ "sdkCode": code })),
            _ => None,
        };
        CommandResult::Error {
            code: self.code().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_error_carries_vendor_code() {
        let err = ApplicationError::sdk(codes::PTZ_ERROR, SdkError::vendor(160002, "busy"));
        match err.into_command_result() {
            CommandResult::Error {
                code,
                message,
                details,
            } => {
                assert_eq!(code, "PTZ_ERROR");
                assert_eq!(message, "SDK error 160002: busy");
                assert_eq!(details, Some(json!({ "sdkCode": 160002 })));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_not_initialized_is_reclassified() {
        let err = ApplicationError::sdk(codes::DEVICE_LIST_ERROR, SdkError::NotInitialized);
        assert_eq!(err.code(), codes::SDK_NOT_INITIALIZED);
    }
}
