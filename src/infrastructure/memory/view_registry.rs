//! In-Memory View Registry

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::application::player::PlayerView;
use crate::application::ports::ViewRegistryPort;

/// 内存视图注册表
pub struct InMemoryViewRegistry {
    views: DashMap<u64, Arc<PlayerView>>,
    next_id: AtomicU64,
}

impl InMemoryViewRegistry {
    pub fn new() -> Self {
        Self {
            views: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRegistryPort for InMemoryViewRegistry {
    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn insert(&self, view: Arc<PlayerView>) {
        let view_id = view.id();
        self.views.insert(view_id, view);
        tracing::info!(view_id = view_id, total = self.views.len(), "Player view registered");
    }

    fn get(&self, view_id: u64) -> Option<Arc<PlayerView>> {
        self.views.get(&view_id).map(|v| Arc::clone(v.value()))
    }

    fn remove(&self, view_id: u64) -> Option<Arc<PlayerView>> {
        let removed = self.views.remove(&view_id).map(|(_, view)| view);
        if removed.is_some() {
            tracing::info!(view_id = view_id, "Player view removed");
        }
        removed
    }

    fn list_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.views.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }
}
