//! Play Target - 播放句柄绑定的目标

use serde::{Deserialize, Serialize};

/// 播放目标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayTarget {
    /// 云端设备通道
    Device { device_serial: String, camera_no: i32 },
    /// 直接播放 URL
    Url { url: String },
    /// 局域网设备（登录后获得的 user id）
    LocalUser {
        user_id: i64,
        camera_no: i32,
        /// 1: 主码流 2: 子码流
        stream_type: i32,
    },
}

impl PlayTarget {
    pub fn device(device_serial: impl Into<String>, camera_no: i32) -> Self {
        Self::Device {
            device_serial: device_serial.into(),
            camera_no,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    /// 设备序列号与通道号（仅设备目标可做录像检索）
    pub fn device_channel(&self) -> Option<(&str, i32)> {
        match self {
            Self::Device {
                device_serial,
                camera_no,
            } => Some((device_serial.as_str(), *camera_no)),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device {
                device_serial,
                camera_no,
            } => write!(f, "device:{}/{}", device_serial, camera_no),
            Self::Url { url } => write!(f, "url:{}", url),
            Self::LocalUser {
                user_id,
                camera_no,
                stream_type,
            } => write!(f, "user:{}/{}#{}", user_id, camera_no, stream_type),
        }
    }
}
