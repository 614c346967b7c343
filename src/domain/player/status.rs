//! Player Status - 播放器状态机

use serde::{Deserialize, Serialize};

/// 播放状态
///
/// - Idle: 空闲状态，默认状态
/// - Init: 已创建播放句柄
/// - Start: 播放中
/// - Pause: 暂停（仅回放）
/// - Stop: 已停止
/// - Error: 错误，只能通过重新 init 恢复
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Idle,
    Init,
    Start,
    Pause,
    Stop,
    Error,
}

impl PlayerStatus {
    /// 线上协议使用的整型值
    pub fn code(&self) -> i32 {
        match self {
            PlayerStatus::Idle => 0,
            PlayerStatus::Init => 1,
            PlayerStatus::Start => 2,
            PlayerStatus::Pause => 3,
            PlayerStatus::Stop => 4,
            PlayerStatus::Error => 5,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(PlayerStatus::Idle),
            1 => Some(PlayerStatus::Init),
            2 => Some(PlayerStatus::Start),
            3 => Some(PlayerStatus::Pause),
            4 => Some(PlayerStatus::Stop),
            5 => Some(PlayerStatus::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerStatus::Idle => "idle",
            PlayerStatus::Init => "init",
            PlayerStatus::Start => "start",
            PlayerStatus::Pause => "pause",
            PlayerStatus::Stop => "stop",
            PlayerStatus::Error => "error",
        }
    }

    /// 状态迁移是否合法
    ///
    /// Idle → Init → Start ⇄ Pause → Stop → Idle；任意状态可进入 Error、Idle（release）
    /// 和 Init（重新初始化）。Error 只能经由 Init 或 Idle 离开。
    pub fn can_transition_to(&self, next: PlayerStatus) -> bool {
        use PlayerStatus::*;
        match (self, next) {
            (_, Error) | (_, Idle) | (_, Init) => true,
            (Error, _) => false,
            (Idle, _) => false,
            (Init | Start | Pause | Stop, Start) => true,
            (Start, Pause) => true,
            (Init | Start | Pause, Stop) => true,
            (Stop, Stop) => true,
            _ => false,
        }
    }
}

impl Default for PlayerStatus {
    fn default() -> Self {
        PlayerStatus::Idle
    }
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
