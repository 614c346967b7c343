//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                      GET   健康检查
//! - /api/channel/camlink           POST  全局通道命令 `{method, arguments}`
//! - /api/player/create             POST  创建播放视图
//! - /api/player/list               GET   列出播放视图
//! - /api/player/{id}               POST  播放视图命令 `{method, arguments}`
//! - /api/player/{id}/dispose       POST  销毁播放视图
//! - /ws/events                     WS    全局事件流
//! - /ws/player/{id}                WS    播放视图事件流

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::global_events_handler))
        .route("/ws/player/:view_id", get(handlers::player_events_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/channel/camlink", post(handlers::invoke_global))
        .nest("/player", player_routes())
}

/// Player 路由
fn player_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_player))
        .route("/list", get(handlers::list_players))
        .route("/:view_id", post(handlers::invoke_player))
        .route("/:view_id/dispose", post(handlers::dispose_player))
}
