//! Device Context - 设备、通道、区域信息

use serde::{Deserialize, Serialize};

/// 设备信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceInfo {
    pub device_serial: String,
    pub device_name: String,
    pub device_type: String,
    /// 1: 在线 2: 离线
    pub status: i32,
    pub is_encrypt: bool,
    #[serde(rename = "isSupportPTZ")]
    pub is_support_ptz: bool,
    pub camera_num: i32,
    pub camera_info_list: Vec<CameraInfo>,
}

impl DeviceInfo {
    /// 通道信息查找
    pub fn camera(&self, camera_no: i32) -> Option<&CameraInfo> {
        self.camera_info_list
            .iter()
            .find(|c| c.camera_no == camera_no)
    }
}

/// 通道信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraInfo {
    pub device_serial: String,
    pub camera_no: i32,
    pub camera_name: String,
    pub status: i32,
    pub is_encrypt: bool,
    pub video_level: i32,
}

/// 设备探测结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeDeviceInfo {
    pub device_serial: String,
    pub device_name: String,
    pub device_type: String,
    pub status: i32,
    pub support_wifi: bool,
    pub net_type: String,
}

/// 局域网设备登录信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetDeviceInfo {
    pub user_id: i64,
    pub channel_count: i32,
    pub start_channel_no: i32,
    pub d_start_channel_no: i32,
    pub d_channel_count: i32,
    #[serde(rename = "byDVRType")]
    pub by_dvr_type: i32,
}

/// 区域信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AreaInfo {
    pub area_id: String,
    pub area_name: String,
}

/// 访问令牌
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessToken {
    pub access_token: String,
    /// 过期时间（epoch 毫秒），0 表示未知
    pub expire_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_info_field_names() {
        let info = DeviceInfo {
            device_serial: "A1".to_string(),
            is_support_ptz: true,
            camera_num: 1,
            ..Default::default()
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["deviceSerial"], "A1");
        assert_eq!(value["isSupportPTZ"], true);
        assert_eq!(value["cameraNum"], 1);
        assert_eq!(value["cameraInfoList"], json!([]));
    }

    #[test]
    fn test_missing_fields_default() {
        let info: NetDeviceInfo = serde_json::from_value(json!({ "userId": 7 })).unwrap();
        assert_eq!(info.user_id, 7);
        assert_eq!(info.channel_count, 0);
        assert_eq!(info.by_dvr_type, 0);

        let probe: ProbeDeviceInfo = serde_json::from_value(json!({})).unwrap();
        assert_eq!(probe.net_type, "");
        assert!(!probe.support_wifi);
    }
}
