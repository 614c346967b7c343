//! PTZ - 云台指令
//!
//! 宿主侧以字符串传递指令和动作，非法字符串必须在调用 SDK 之前被拒绝。

use serde::{Deserialize, Serialize};

/// 云台指令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PtzCommand {
    Left,
    Right,
    Up,
    Down,
    ZoomIn,
    ZoomOut,
}

impl PtzCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            PtzCommand::Left => "EZPTZCommand_Left",
            PtzCommand::Right => "EZPTZCommand_Right",
            PtzCommand::Up => "EZPTZCommand_Up",
            PtzCommand::Down => "EZPTZCommand_Down",
            PtzCommand::ZoomIn => "EZPTZCommand_ZoomIn",
            PtzCommand::ZoomOut => "EZPTZCommand_ZoomOut",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EZPTZCommand_Left" => Some(PtzCommand::Left),
            "EZPTZCommand_Right" => Some(PtzCommand::Right),
            "EZPTZCommand_Up" => Some(PtzCommand::Up),
            "EZPTZCommand_Down" => Some(PtzCommand::Down),
            "EZPTZCommand_ZoomIn" => Some(PtzCommand::ZoomIn),
            "EZPTZCommand_ZoomOut" => Some(PtzCommand::ZoomOut),
            _ => None,
        }
    }
}

/// 云台动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PtzAction {
    Start,
    Stop,
}

impl PtzAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PtzAction::Start => "EZPTZAction_START",
            PtzAction::Stop => "EZPTZAction_STOP",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EZPTZAction_START" => Some(PtzAction::Start),
            "EZPTZAction_STOP" => Some(PtzAction::Stop),
            _ => None,
        }
    }
}

impl std::fmt::Display for PtzCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for PtzAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
