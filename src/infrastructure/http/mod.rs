//! HTTP Layer - 宿主适配层
//!
//! 把命令通道和事件通道暴露为 HTTP + WebSocket 接口

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::HttpServer;
pub use state::AppState;
