//! HTTP Error Handling
//!
//! 适配层自身的错误（未知视图、请求体无法解析）。与命令失败使用同一种
//! 线上格式，HTTP 状态码始终为 200。

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{codes, CommandResult};

/// 错误码定义
pub mod code {
    pub const VIEW_NOT_FOUND: &str = "VIEW_NOT_FOUND";
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    ViewNotFound(u64),
    BadRequest(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ViewNotFound(_) => code::VIEW_NOT_FOUND,
            ApiError::BadRequest(_) => codes::INVALID_ARGUMENTS,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::ViewNotFound(view_id) => format!("Player view not found: {}", view_id),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.message();
        tracing::warn!(code = self.code(), error = %message, "API request rejected");

        let body = CommandResult::Error {
            code: self.code().to_string(),
            message,
            details: None,
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
