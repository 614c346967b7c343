//! WebSocket Handlers - 事件流
//!
//! 连接建立时订阅事件通道，断开时取消订阅。

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::application::GLOBAL_EVENT_CHANNEL;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 全局事件流（对讲状态等）
pub async fn global_events_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| forward_channel(socket, GLOBAL_EVENT_CHANNEL.to_string(), state))
}

/// 播放视图事件流
pub async fn player_events_handler(
    ws: WebSocketUpgrade,
    Path(view_id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.view(view_id)?;
    let channel = view.event_channel().to_string();
    Ok(ws.on_upgrade(move |socket| forward_channel(socket, channel, state)))
}

async fn forward_channel(socket: WebSocket, channel: String, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut event_rx = state.events.listen(&channel);

    tracing::info!(channel = %channel, "Event stream connected");

    let forward_channel = channel.clone();
    let mut forward_task = tokio::spawn(async move {
        while let Some(wire) = event_rx.recv().await {
            if let Err(e) = sender.send(Message::Text(wire)).await {
                tracing::debug!(channel = %forward_channel, error = %e, "Failed to send event");
                break;
            }
        }
        let _ = sender.close().await;
    });

    // 客户端消息只用于保活
    let receive_channel = channel.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!(channel = %receive_channel, "Event stream closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(channel = %receive_channel, error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut forward_task => receive_task.abort(),
        _ = &mut receive_task => {
            forward_task.abort();
            let _ = forward_task.await;
        }
    }

    // 只移除自己的订阅；若已被新连接顶替则保留
    state.events.prune(&channel);
    tracing::info!(channel = %channel, "Event stream disconnected");
}
