//! 通道命名

/// 全局命令通道
pub const GLOBAL_METHOD_CHANNEL: &str = "camlink";

/// 全局事件通道（对讲状态等）
pub const GLOBAL_EVENT_CHANNEL: &str = "camlink_event";

/// 播放视图命令通道
pub fn player_method_channel(view_id: u64) -> String {
    format!("camlink_player_{}", view_id)
}

/// 播放视图事件通道
pub fn player_event_channel(view_id: u64) -> String {
    format!("camlink_player_event_{}", view_id)
}
