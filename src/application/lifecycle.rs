//! SDK Lifecycle - SDK 初始化状态与生命周期锁
//!
//! 全局通道与所有播放视图共享同一把锁：`initSDK` / `destroySDK` 持有写锁，
//! 其它触及 SDK 的调用在整个执行期间持有读锁。

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// SDK 生命周期守卫，锁内的值表示 SDK 是否已初始化
pub struct SdkLifecycle {
    initialized: RwLock<bool>,
}

impl SdkLifecycle {
    pub fn new(initialized: bool) -> Self {
        Self {
            initialized: RwLock::new(initialized),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn is_initialized(&self) -> bool {
        *self.initialized.read().await
    }

    /// 普通调用：持有期间不会发生重新初始化或销毁
    pub async fn read(&self) -> RwLockReadGuard<'_, bool> {
        self.initialized.read().await
    }

    /// 生命周期调用：等待所有进行中的调用结束
    pub async fn write(&self) -> RwLockWriteGuard<'_, bool> {
        self.initialized.write().await
    }
}

impl Default for SdkLifecycle {
    fn default() -> Self {
        Self::new(false)
    }
}
