//! Events - 状态事件推送

mod hub;

pub use hub::EventHub;
