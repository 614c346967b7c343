//! 应用层 - 播放会话
//!
//! - session: 单句柄会话与状态机
//! - view: 播放控件实例（会话 + 通道名）

mod session;
mod view;

pub use session::{
    map_callback, PlayerSession, NOT_READY_FOR_VERIFY_CODE, NO_RECORDINGS, PLAYBACK_REFUSED,
};
pub use view::PlayerView;
