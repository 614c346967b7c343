//! Status Emitter Port - 事件推送抽象
//!
//! 会话只依赖这个 trait 发布状态事件，不关心事件如何送达宿主。

use crate::domain::StatusEvent;

pub trait StatusEmitter: Send + Sync {
    /// 向指定通道推送事件，没有订阅者时直接丢弃
    fn emit(&self, channel: &str, event: StatusEvent);
}
