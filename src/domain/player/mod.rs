//! Player Context
//!
//! 播放会话相关的值对象

mod event;
mod status;
mod target;

pub use event::{StatusEvent, StatusPayload, PLAYER_STATUS_CHANGE, PLAYER_STATUS_MSG};
pub use status::PlayerStatus;
pub use target::PlayTarget;
