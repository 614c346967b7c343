//! SDK Commands - 全局通道命令参数
//!
//! 每个结构体的 `from_arguments` 即该命令的默认值说明。

use crate::application::error::{codes, ApplicationError};
use crate::domain::{PtzAction, PtzCommand};

use super::arguments::{Arguments, FromArguments};

/// initSDK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSdkArgs {
    pub app_key: String,
    pub access_token: String,
    /// 默认 false
    pub enable_log: bool,
    /// 默认 false
    pub enable_p2p: bool,
    /// 未提供时使用配置中的默认地址
    pub base_url: Option<String>,
}

impl FromArguments for InitSdkArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            app_key: args.str_or("appKey", ""),
            access_token: args.str_or("accessToken", ""),
            enable_log: args.bool_or("enableLog", false),
            enable_p2p: args.bool_or("enableP2P", false),
            base_url: args.opt_str("baseUrl").filter(|url| !url.is_empty()),
        }
    }
}

/// enableLog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnableLogArgs {
    pub enable_log: bool,
}

impl FromArguments for EnableLogArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            enable_log: args.bool_or("enableLog", false),
        }
    }
}

/// enableP2P
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnableP2pArgs {
    pub enable_p2p: bool,
}

impl FromArguments for EnableP2pArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            enable_p2p: args.bool_or("enableP2P", false),
        }
    }
}

/// setAccessToken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenArgs {
    pub access_token: String,
}

impl FromArguments for AccessTokenArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            access_token: args.str_or("accessToken", ""),
        }
    }
}

/// setServerUrl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerUrlArgs {
    pub api_url: String,
    pub auth_url: String,
}

impl FromArguments for ServerUrlArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            api_url: args.str_or("apiUrl", ""),
            auth_url: args.str_or("authUrl", ""),
        }
    }
}

/// getDeviceInfo / deleteDevice / probeDeviceInfo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSerialArgs {
    pub device_serial: String,
}

impl FromArguments for DeviceSerialArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            device_serial: args.str_or("deviceSerial", ""),
        }
    }
}

/// getDeviceList
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceListArgs {
    /// 默认 0
    pub page_start: i32,
    /// 默认 10
    pub page_size: i32,
}

impl DeviceListArgs {
    /// getDeviceInfoList 使用的固定分页
    pub const FULL_LIST: DeviceListArgs = DeviceListArgs {
        page_start: 0,
        page_size: 100,
    };
}

impl FromArguments for DeviceListArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            page_start: args.i32_or("pageStart", 0),
            page_size: args.i32_or("pageSize", 10),
        }
    }
}

/// addDevice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDeviceArgs {
    pub device_serial: String,
    pub verify_code: String,
}

impl FromArguments for AddDeviceArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            device_serial: args.str_or("deviceSerial", ""),
            verify_code: args.str_or("verifyCode", ""),
        }
    }
}

/// setVideoLevel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLevelArgs {
    pub device_serial: String,
    pub camera_id: i32,
    pub video_level: i32,
}

impl FromArguments for VideoLevelArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            device_serial: args.str_or("deviceSerial", ""),
            camera_id: args.i32_or("cameraId", 0),
            video_level: args.i32_or("videoLevel", 0),
        }
    }
}

/// controlPTZ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPtzArgs {
    pub device_serial: String,
    pub camera_id: i32,
    pub command: String,
    pub action: String,
    /// 默认 0
    pub speed: i32,
}

impl FromArguments for ControlPtzArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            device_serial: args.str_or("deviceSerial", ""),
            camera_id: args.i32_or("cameraId", 0),
            command: args.str_or("command", ""),
            action: args.str_or("action", ""),
            speed: args.i32_or("speed", 0),
        }
    }
}

impl ControlPtzArgs {
    pub fn validate(&self) -> Result<(PtzCommand, PtzAction), ApplicationError> {
        parse_ptz(&self.command, &self.action)
    }
}

/// loginNetDevice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginNetDeviceArgs {
    pub user_id: String,
    pub pwd: String,
    pub ip_addr: String,
    pub port: i32,
}

impl FromArguments for LoginNetDeviceArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            user_id: args.str_or("userId", ""),
            pwd: args.str_or("pwd", ""),
            ip_addr: args.str_or("ipAddr", ""),
            port: args.i32_or("port", 0),
        }
    }
}

/// logoutNetDevice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutNetDeviceArgs {
    pub user_id: i64,
}

impl FromArguments for LogoutNetDeviceArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            user_id: args.i64_or("userId", 0),
        }
    }
}

/// netControlPTZ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetControlPtzArgs {
    pub user_id: i64,
    pub channel_no: i32,
    pub command: String,
    pub action: String,
}

impl FromArguments for NetControlPtzArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            user_id: args.i64_or("userId", 0),
            channel_no: args.i32_or("channelNo", 0),
            command: args.str_or("command", ""),
            action: args.str_or("action", ""),
        }
    }
}

impl NetControlPtzArgs {
    pub fn validate(&self) -> Result<(PtzCommand, PtzAction), ApplicationError> {
        parse_ptz(&self.command, &self.action)
    }
}

/// startVoiceTalk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartVoiceTalkArgs {
    pub device_serial: String,
    pub verify_code: Option<String>,
    /// 默认 1
    pub camera_no: i32,
}

impl FromArguments for StartVoiceTalkArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            device_serial: args.str_or("deviceSerial", ""),
            verify_code: args.opt_str("verifyCode"),
            camera_no: args.i32_or("cameraNo", 1),
        }
    }
}

/// searchRecordFile / searchDeviceRecordFile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecordArgs {
    pub device_serial: String,
    /// 默认 1
    pub camera_no: i32,
    /// epoch 毫秒
    pub start_time: i64,
    /// epoch 毫秒
    pub end_time: i64,
    /// 仅云录像使用，0 表示全部类型
    pub rec_type: i32,
}

impl FromArguments for SearchRecordArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            device_serial: args.str_or("deviceSerial", ""),
            camera_no: args.i32_or("cameraNo", 1),
            start_time: args.i64_or("startTime", 0),
            end_time: args.i64_or("endTime", 0),
            rec_type: args.i32_or("recType", 0),
        }
    }
}

/// openLoginPage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPageArgs {
    pub area_id: Option<String>,
}

impl FromArguments for LoginPageArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            area_id: args.opt_str("areaId"),
        }
    }
}

/// startConfigWifi
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWifiArgs {
    pub device_serial: String,
    pub ssid: String,
    pub password: String,
    pub mode: i32,
}

impl FromArguments for ConfigWifiArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            device_serial: args.str_or("deviceSerial", ""),
            ssid: args.str_or("ssid", ""),
            password: args.str_or("password", ""),
            mode: args.i32_or("mode", 0),
        }
    }
}

/// 校验云台指令与动作字符串
pub fn parse_ptz(command: &str, action: &str) -> Result<(PtzCommand, PtzAction), ApplicationError> {
    let command = PtzCommand::parse(command).ok_or_else(|| {
        ApplicationError::invalid(
            codes::INVALID_PTZ_COMMAND,
            format!("Unrecognized PTZ command: {:?}", command),
        )
    })?;
    let action = PtzAction::parse(action).ok_or_else(|| {
        ApplicationError::invalid(
            codes::INVALID_PTZ_ACTION,
            format!("Unrecognized PTZ action: {:?}", action),
        )
    })?;
    Ok((command, action))
}
