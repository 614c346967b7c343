//! Player View - 宿主侧播放控件实例

use std::sync::Arc;

use crate::application::channels::{player_event_channel, player_method_channel};
use crate::application::lifecycle::SdkLifecycle;
use crate::application::ports::{CameraSdkPort, StatusEmitter};

use super::PlayerSession;

/// 一个播放控件：独立的命令通道、事件通道和会话
pub struct PlayerView {
    id: u64,
    method_channel: String,
    session: Arc<PlayerSession>,
}

impl PlayerView {
    pub fn new(
        id: u64,
        sdk: Arc<dyn CameraSdkPort>,
        lifecycle: Arc<SdkLifecycle>,
        emitter: Arc<dyn StatusEmitter>,
    ) -> Self {
        Self {
            id,
            method_channel: player_method_channel(id),
            session: Arc::new(PlayerSession::new(
                player_event_channel(id),
                sdk,
                lifecycle,
                emitter,
            )),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn method_channel(&self) -> &str {
        &self.method_channel
    }

    pub fn event_channel(&self) -> &str {
        self.session.channel()
    }

    pub fn session(&self) -> &Arc<PlayerSession> {
        &self.session
    }

    /// 控件销毁时调用，SDK 已销毁时同样释放句柄
    pub async fn dispose(&self) {
        let _lifecycle = self.session.lifecycle().read().await;
        self.session.release().await;
        tracing::info!(view_id = self.id, "Player view disposed");
    }
}
