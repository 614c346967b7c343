//! Camlink - 网络摄像机控制桥
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 设备、通道、录像描述
//! - 播放状态、播放目标、状态事件
//! - PTZ 指令
//!
//! 应用层 (application/):
//! - Ports: CameraSdkPort, PlayerHandle, StatusEmitter, ViewRegistryPort
//! - Commands: 命令名表与参数解析
//! - Dispatcher: 全局通道与播放视图通道的命令分发
//! - Player: 播放会话状态机
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 模拟相机 SDK
//! - Runtime: 主执行上下文、命令通道
//! - Events: 事件通道
//! - Memory: 播放视图注册表
//! - HTTP: 命令接口 + WebSocket 事件流

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
