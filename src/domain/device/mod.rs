//! Device Context - 设备描述对象
//!
//! SDK 返回的数据逐字段转为宿主可序列化的结构，缺失字段取 0 / "" / false。

mod info;
mod record;

pub use info::{AccessToken, AreaInfo, CameraInfo, DeviceInfo, NetDeviceInfo, ProbeDeviceInfo};
pub use record::{RecordFile, RecordSource};
