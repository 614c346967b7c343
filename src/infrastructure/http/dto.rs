//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::player::PlayerView;

/// 创建播放视图的响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerResponse {
    pub view_id: u64,
    pub method_channel: String,
    pub event_channel: String,
}

impl From<&PlayerView> for CreatePlayerResponse {
    fn from(view: &PlayerView) -> Self {
        Self {
            view_id: view.id(),
            method_channel: view.method_channel().to_string(),
            event_channel: view.event_channel().to_string(),
        }
    }
}

/// 播放视图列表
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListResponse {
    pub view_ids: Vec<u64>,
}
