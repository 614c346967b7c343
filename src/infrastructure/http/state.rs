//! Application State

use std::sync::Arc;

use crate::application::player::PlayerView;
use crate::application::{
    CameraSdkPort, SdkDispatcher, SdkLifecycle, ViewRegistryPort, GLOBAL_METHOD_CHANNEL,
};
use crate::infrastructure::events::EventHub;
use crate::infrastructure::runtime::{MainContext, MethodChannel};

use super::error::ApiError;

/// 应用状态
pub struct AppState {
    pub sdk: Arc<dyn CameraSdkPort>,
    /// 全局通道与播放视图共享
    pub lifecycle: Arc<SdkLifecycle>,
    pub events: Arc<EventHub>,
    pub views: Arc<dyn ViewRegistryPort>,
    pub main: MainContext,
    /// 全局命令通道
    pub global_channel: MethodChannel,
}

impl AppState {
    pub fn new(
        sdk: Arc<dyn CameraSdkPort>,
        events: Arc<EventHub>,
        views: Arc<dyn ViewRegistryPort>,
        main: MainContext,
        default_base_url: impl Into<String>,
    ) -> Self {
        let lifecycle = SdkLifecycle::default().arc();
        let dispatcher = Arc::new(SdkDispatcher::new(
            Arc::clone(&sdk),
            Arc::clone(&lifecycle),
            events.clone(),
            default_base_url,
        ));
        let global_channel = MethodChannel::new(GLOBAL_METHOD_CHANNEL, dispatcher, main.clone());

        Self {
            sdk,
            lifecycle,
            events,
            views,
            main,
            global_channel,
        }
    }

    /// 创建并注册新的播放视图
    pub fn create_view(&self) -> Arc<PlayerView> {
        let view_id = self.views.next_id();
        let view = Arc::new(PlayerView::new(
            view_id,
            Arc::clone(&self.sdk),
            Arc::clone(&self.lifecycle),
            self.events.clone(),
        ));
        self.views.insert(Arc::clone(&view));
        view
    }

    pub fn view(&self, view_id: u64) -> Result<Arc<PlayerView>, ApiError> {
        self.views
            .get(view_id)
            .ok_or(ApiError::ViewNotFound(view_id))
    }

    /// 视图的命令通道
    pub fn player_channel(&self, view: Arc<PlayerView>) -> MethodChannel {
        let name = view.method_channel().to_string();
        MethodChannel::new(name, view, self.main.clone())
    }
}
