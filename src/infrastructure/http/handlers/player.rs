//! Player View Handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::application::{CommandResult, MethodCall};
use crate::infrastructure::http::dto::{CreatePlayerResponse, PlayerListResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建播放视图
pub async fn create_player(State(state): State<Arc<AppState>>) -> Json<CreatePlayerResponse> {
    let view = state.create_view();
    Json(CreatePlayerResponse::from(view.as_ref()))
}

/// 列出播放视图
pub async fn list_players(State(state): State<Arc<AppState>>) -> Json<PlayerListResponse> {
    Json(PlayerListResponse {
        view_ids: state.views.list_ids(),
    })
}

/// 播放视图命令
pub async fn invoke_player(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<u64>,
    payload: Result<Json<MethodCall>, JsonRejection>,
) -> Result<Json<CommandResult>, ApiError> {
    let view = state.view(view_id)?;
    let Json(call) = payload?;
    tracing::debug!(view_id = view_id, method = %call.method, "Player channel call");

    let channel = state.player_channel(view);
    Ok(Json(channel.call(call).await))
}

/// 销毁播放视图：释放句柄并关闭事件通道
pub async fn dispose_player(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<u64>,
) -> Result<Json<CommandResult>, ApiError> {
    let view = state
        .views
        .remove(view_id)
        .ok_or(ApiError::ViewNotFound(view_id))?;

    view.dispose().await;
    // 释放产生的 Stop/Idle 仍在主上下文队列中
    state.events.cancel_after_pending(view.event_channel());
    Ok(Json(CommandResult::success(serde_json::Value::Bool(true))))
}
