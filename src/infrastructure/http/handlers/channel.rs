//! Global Channel Handler

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::application::{CommandResult, MethodCall};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 全局通道命令
pub async fn invoke_global(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MethodCall>, JsonRejection>,
) -> Result<Json<CommandResult>, ApiError> {
    let Json(call) = payload?;
    tracing::debug!(method = %call.method, "Global channel call");
    Ok(Json(state.global_channel.call(call).await))
}
