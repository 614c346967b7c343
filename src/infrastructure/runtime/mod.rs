//! Runtime - 主执行上下文与命令通道
//!
//! 命令在后台任务中执行，结果回复与事件推送统一投递到 `MainContext` 上按顺序执行。

mod main_context;
mod method_channel;

pub use main_context::MainContext;
pub use method_channel::MethodChannel;
