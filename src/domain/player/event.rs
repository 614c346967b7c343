//! Status Event - 推送给宿主的事件信封
//!
//! 信封固定为 `{eventType, msg, data}`，其中 `data` 本身是一段 JSON 字符串
//! （二次编码），消费方需要对 `data` 再做一次 JSON 解析。

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::PlayerStatus;

/// 播放器状态事件类型
pub const PLAYER_STATUS_CHANGE: &str = "playerStatusChange";

/// 播放器状态事件描述
pub const PLAYER_STATUS_MSG: &str = "Player Status Changed";

/// 事件信封
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    #[serde(rename = "eventType")]
    pub event_type: String,
    pub msg: String,
    pub data: Option<String>,
}

/// `data` 字段解码后的结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusPayload {
    pub status: i32,
    pub message: Option<String>,
}

impl StatusEvent {
    pub fn new(event_type: impl Into<String>, msg: impl Into<String>, data: Option<String>) -> Self {
        Self {
            event_type: event_type.into(),
            msg: msg.into(),
            data,
        }
    }

    /// 构造播放器状态变更事件
    pub fn player_status(status: PlayerStatus, message: Option<&str>) -> Self {
        let data = json!({
            "status": status.code(),
            "message": message,
        })
        .to_string();

        Self::new(PLAYER_STATUS_CHANGE, PLAYER_STATUS_MSG, Some(data))
    }

    /// 序列化为线上格式
    pub fn to_wire(&self) -> String {
        json!({
            "eventType": self.event_type,
            "msg": self.msg,
            "data": self.data,
        })
        .to_string()
    }

    /// 解析 `data` 字段（第二层 JSON）
    pub fn payload(&self) -> Option<StatusPayload> {
        self.data
            .as_deref()
            .and_then(|data| serde_json::from_str(data).ok())
    }
}
