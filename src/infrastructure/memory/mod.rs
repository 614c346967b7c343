//! Memory Layer - In-Memory State Management
//!
//! 播放视图实例的内存注册表

mod view_registry;

pub use view_registry::InMemoryViewRegistry;
