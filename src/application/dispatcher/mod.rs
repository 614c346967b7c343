//! 应用层 - 命令分发
//!
//! 方法名 → 处理逻辑。未知方法返回 `NotImplemented`，任何失败都转换成
//! `CommandResult::Error`，不会 panic。

use async_trait::async_trait;

use crate::application::commands::{CommandResult, MethodCall};
use crate::application::error::ApplicationError;

mod player;
mod sdk;

pub use player::PlayerDispatcher;
pub use sdk::SdkDispatcher;

/// 命令通道的处理端
#[async_trait]
pub trait CallHandler: Send + Sync {
    async fn handle(&self, call: MethodCall) -> CommandResult;
}

/// 序列化命令返回值
fn to_json<T: serde::Serialize>(value: T) -> Result<serde_json::Value, ApplicationError> {
    serde_json::to_value(value).map_err(|e| ApplicationError::internal(e.to_string()))
}
