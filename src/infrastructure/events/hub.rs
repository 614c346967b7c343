//! Event Hub - 事件通道
//!
//! 每个事件通道至多一个订阅者，重复 listen 会顶替旧订阅者（旧接收端随即结束）。
//! 推送是即发即弃的：没有订阅者时直接丢弃，不缓存也不重放。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::application::ports::StatusEmitter;
use crate::domain::StatusEvent;
use crate::infrastructure::runtime::MainContext;

/// 事件通道集合
pub struct EventHub {
    /// channel -> 订阅者
    subscribers: Arc<DashMap<String, mpsc::UnboundedSender<String>>>,
    main: MainContext,
}

impl EventHub {
    pub fn new(main: MainContext) -> Self {
        Self {
            subscribers: Arc::new(DashMap::new()),
            main,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅通道，返回线上格式的事件流
    pub fn listen(&self, channel: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        if self.subscribers.insert(channel.to_string(), tx).is_some() {
            tracing::debug!(channel = %channel, "Replacing previous event subscriber");
        } else {
            tracing::debug!(channel = %channel, "Event subscriber attached");
        }
        rx
    }

    /// 取消订阅
    pub fn cancel(&self, channel: &str) {
        if self.subscribers.remove(channel).is_some() {
            tracing::debug!(channel = %channel, "Event subscriber cancelled");
        }
    }

    /// 排在已投递到主上下文的事件之后取消订阅
    pub fn cancel_after_pending(&self, channel: &str) {
        let subscribers = Arc::clone(&self.subscribers);
        let channel = channel.to_string();
        self.main.post(move || {
            if subscribers.remove(&channel).is_some() {
                tracing::debug!(channel = %channel, "Event subscriber cancelled after pending events");
            }
        });
    }

    /// 订阅者的接收端已关闭时才移除，返回是否移除
    pub fn prune(&self, channel: &str) -> bool {
        let removed = self
            .subscribers
            .remove_if(channel, |_, sender| sender.is_closed())
            .is_some();
        if removed {
            tracing::debug!(channel = %channel, "Event subscriber detached");
        }
        removed
    }

    pub fn has_listener(&self, channel: &str) -> bool {
        self.subscribers.contains_key(channel)
    }

    /// 在主上下文上推送事件
    pub fn publish(&self, channel: &str, event: &StatusEvent) {
        let subscribers = Arc::clone(&self.subscribers);
        let channel = channel.to_string();
        let wire = event.to_wire();

        self.main.post(move || {
            let Some(sender) = subscribers.get(&channel).map(|s| s.clone()) else {
                tracing::debug!(channel = %channel, "No subscriber, dropping event");
                return;
            };
            if sender.send(wire).is_err() {
                tracing::debug!(channel = %channel, "Subscriber went away, dropping event");
                subscribers.remove_if(&channel, |_, current| current.is_closed());
            }
        });
    }
}

impl StatusEmitter for EventHub {
    fn emit(&self, channel: &str, event: StatusEvent) {
        self.publish(channel, &event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerStatus, StatusPayload};
    use serde_json::Value;
    use std::time::Duration;

    fn hub() -> EventHub {
        let (main, _handle) = MainContext::start();
        EventHub::new(main)
    }

    #[tokio::test]
    async fn test_emit_reaches_listener() {
        let hub = hub();
        let mut rx = hub.listen("camlink_event");
        hub.emit(
            "camlink_event",
            StatusEvent::player_status(PlayerStatus::Start, None),
        );

        let wire = rx.recv().await.unwrap();
        let envelope: Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(envelope["eventType"], "playerStatusChange");
        assert_eq!(envelope["msg"], "Player Status Changed");
        let payload: StatusPayload =
            serde_json::from_str(envelope["data"].as_str().unwrap()).unwrap();
        assert_eq!(payload.status, 2);
        assert_eq!(payload.message, None);
    }

    #[tokio::test]
    async fn test_listen_replaces_previous_subscriber() {
        let hub = hub();
        let mut first = hub.listen("ch");
        let mut second = hub.listen("ch");

        hub.emit("ch", StatusEvent::player_status(PlayerStatus::Init, None));
        assert!(first.recv().await.is_none());
        assert!(second.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_emit_without_listener_is_dropped() {
        let hub = hub();
        hub.emit("nobody", StatusEvent::player_status(PlayerStatus::Idle, None));

        // 之后才订阅的不会收到之前的事件
        tokio::time::sleep(Duration::from_millis(10)).await;
        let mut rx = hub.listen("nobody");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_ends_stream() {
        let hub = hub();
        let mut rx = hub.listen("ch");
        assert!(hub.has_listener("ch"));
        hub.cancel("ch");
        assert!(!hub.has_listener("ch"));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_after_pending_delivers_queued_events() {
        let hub = hub();
        let mut rx = hub.listen("ch");
        hub.emit("ch", StatusEvent::player_status(PlayerStatus::Stop, None));
        hub.emit("ch", StatusEvent::player_status(PlayerStatus::Idle, None));
        hub.cancel_after_pending("ch");

        let statuses: Vec<i32> = [rx.recv().await, rx.recv().await]
            .into_iter()
            .map(|wire| {
                let envelope: Value = serde_json::from_str(&wire.unwrap()).unwrap();
                let payload: StatusPayload =
                    serde_json::from_str(envelope["data"].as_str().unwrap()).unwrap();
                payload.status
            })
            .collect();
        assert_eq!(statuses, vec![4, 0]);
        assert!(rx.recv().await.is_none());
        assert!(!hub.has_listener("ch"));
    }

    #[tokio::test]
    async fn test_prune_keeps_live_subscriber() {
        let hub = hub();
        drop(hub.listen("ch"));
        assert!(hub.prune("ch"));

        let _live = hub.listen("ch");
        assert!(!hub.prune("ch"));
        assert!(hub.has_listener("ch"));
    }

    #[tokio::test]
    async fn test_closed_subscriber_is_pruned() {
        let hub = hub();
        drop(hub.listen("ch"));
        hub.emit("ch", StatusEvent::player_status(PlayerStatus::Stop, None));

        for _ in 0..50 {
            if !hub.has_listener("ch") {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("closed subscriber was not removed");
    }
}
