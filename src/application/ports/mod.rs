//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod camera_sdk;
mod status_emitter;
mod view_registry;

pub use camera_sdk::{
    CameraSdkPort, PlayerCallback, PlayerCallbackSender, PlayerHandle, SdkError, SdkInitOptions,
};
pub use status_emitter::StatusEmitter;
pub use view_registry::ViewRegistryPort;
