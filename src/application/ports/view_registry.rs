//! View Registry Port - 播放视图实例管理
//!
//! 每个宿主侧播放控件对应一个视图实例，拥有独立的命令通道和事件通道。

use std::sync::Arc;

use crate::application::player::PlayerView;

pub trait ViewRegistryPort: Send + Sync {
    /// 分配新的视图 ID
    fn next_id(&self) -> u64;

    fn insert(&self, view: Arc<PlayerView>);

    fn get(&self, view_id: u64) -> Option<Arc<PlayerView>>;

    fn remove(&self, view_id: u64) -> Option<Arc<PlayerView>>;

    fn list_ids(&self) -> Vec<u64>;
}
