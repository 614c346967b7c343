//! Method Call / Command Result

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::error::ApplicationError;

/// 宿主发起的一次命令调用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// 无参数调用
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, Value::Null)
    }
}

/// 命令结果
///
/// 成功值只包含可序列化的普通数据，从不暴露 SDK 句柄。
/// `NotImplemented` 与失败区分开，表示宿主调用了不存在的方法。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CommandResult {
    Success {
        result: Value,
    },
    Error {
        code: String,
        message: String,
        details: Option<Value>,
    },
    NotImplemented,
}

impl CommandResult {
    pub fn success(result: Value) -> Self {
        Self::Success { result }
    }

    pub fn from_outcome(outcome: Result<Value, ApplicationError>) -> Self {
        match outcome {
            Ok(result) => Self::Success { result },
            Err(e) => e.into_command_result(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// 成功时的返回值
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success { result } => Some(result),
            _ => None,
        }
    }

    /// 失败时的错误码
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Error { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let ok = serde_json::to_value(CommandResult::success(json!(true))).unwrap();
        assert_eq!(ok, json!({ "status": "success", "result": true }));

        let not_impl = serde_json::to_value(CommandResult::NotImplemented).unwrap();
        assert_eq!(not_impl, json!({ "status": "notImplemented" }));

        let err = serde_json::to_value(CommandResult::Error {
            code: "PTZ_ERROR".to_string(),
            message: "busy".to_string(),
            details: None,
        })
        .unwrap();
        assert_eq!(err["status"], "error");
        assert_eq!(err["code"], "PTZ_ERROR");
        assert!(err["details"].is_null());
    }

    #[test]
    fn test_missing_arguments_deserialize_as_null() {
        let call: MethodCall = serde_json::from_value(json!({ "method": "logout" })).unwrap();
        assert_eq!(call.arguments, Value::Null);
    }
}
