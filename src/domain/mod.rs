//! Domain Layer - 领域层
//!
//! 纯数据类型，不依赖任何外部 SDK：
//! - player: 播放器状态机、播放目标、状态事件
//! - device: 设备/区域/录像等描述对象
//! - ptz: 云台指令

pub mod device;
pub mod player;
pub mod ptz;

pub use device::{
    AccessToken, AreaInfo, CameraInfo, DeviceInfo, NetDeviceInfo, ProbeDeviceInfo, RecordFile,
    RecordSource,
};
pub use player::{PlayTarget, PlayerStatus, StatusEvent, StatusPayload};
pub use ptz::{PtzAction, PtzCommand};
