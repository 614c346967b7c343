//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CameraSdkPort、PlayerHandle、StatusEmitter、ViewRegistryPort）
//! - commands: 方法调用、命令结果与参数解码
//! - player: 播放会话
//! - dispatcher: 全局通道与播放视图通道的命令分发
//! - lifecycle: SDK 生命周期锁
//! - error: 应用层错误定义

pub mod channels;
pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod lifecycle;
pub mod player;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use channels::{
    player_event_channel, player_method_channel, GLOBAL_EVENT_CHANNEL, GLOBAL_METHOD_CHANNEL,
};
pub use commands::{Arguments, CommandResult, FromArguments, MethodCall, PlayerMethod, SdkMethod};
pub use dispatcher::{CallHandler, PlayerDispatcher, SdkDispatcher};
pub use error::{codes, ApplicationError};
pub use lifecycle::SdkLifecycle;
pub use player::{PlayerSession, PlayerView};
pub use ports::{
    CameraSdkPort, PlayerCallback, PlayerCallbackSender, PlayerHandle, SdkError, SdkInitOptions,
    StatusEmitter, ViewRegistryPort,
};
