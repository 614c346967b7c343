//! Camera SDK Port - 厂商摄像头 SDK 抽象
//!
//! 厂商 SDK 是进程级单例，所有网络 I/O、解码、云台传输都在 SDK 内部完成。
//! 桥接层只通过这里定义的接口与之交互，具体实现在 infrastructure/adapters 层。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::{
    AccessToken, AreaInfo, DeviceInfo, NetDeviceInfo, PlayTarget, ProbeDeviceInfo, PtzAction,
    PtzCommand, RecordFile, RecordSource,
};

/// SDK 错误
#[derive(Debug, Clone, Error)]
pub enum SdkError {
    #[error("SDK not initialized")]
    NotInitialized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Player already released")]
    Released,

    #[error("SDK error {code}: {message}")]
    Vendor { code: i32, message: String },
}

impl SdkError {
    pub fn vendor(code: i32, message: impl Into<String>) -> Self {
        Self::Vendor {
            code,
            message: message.into(),
        }
    }

    /// 厂商错误码（如有）
    pub fn vendor_code(&self) -> Option<i32> {
        match self {
            Self::Vendor { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// SDK 初始化参数
#[derive(Debug, Clone, Default)]
pub struct SdkInitOptions {
    pub app_key: String,
    pub access_token: String,
    pub enable_log: bool,
    pub enable_p2p: bool,
    pub api_url: String,
    pub auth_url: String,
}

/// 播放器回调
///
/// SDK 在自己的线程上通过回调通知播放状态，这里统一转成消息投递到通道里
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCallback {
    /// 直播/回放开始出流
    PlayStart,
    /// 直播/回放停止成功
    StopSuccess,
    /// 设备加密，验证码错误
    PasswordError(String),
    /// 播放失败 / 连接异常
    PlayFailed(String),
    /// 其它消息码，负数表示错误
    Message(i32),
    /// 视频画面尺寸
    DisplaySize { width: i32, height: i32 },
}

/// 回调发送端，随播放句柄一起交给 SDK
pub type PlayerCallbackSender = mpsc::UnboundedSender<PlayerCallback>;

/// 播放句柄
///
/// 对应 SDK 内部的一个播放器对象，释放后任何操作都应返回 [`SdkError::Released`]
#[async_trait]
pub trait PlayerHandle: Send + Sync {
    /// 句柄标识（用于日志）
    fn id(&self) -> &str;

    async fn start_real_play(&self) -> Result<bool, SdkError>;

    async fn stop_real_play(&self) -> Result<bool, SdkError>;

    async fn start_playback(&self, file: &RecordFile) -> Result<bool, SdkError>;

    async fn stop_playback(&self) -> Result<bool, SdkError>;

    async fn pause_playback(&self) -> Result<bool, SdkError>;

    async fn resume_playback(&self) -> Result<bool, SdkError>;

    /// 拖动回放进度（epoch 毫秒）
    async fn seek_playback(&self, time_ms: i64) -> Result<bool, SdkError>;

    /// 当前画面 OSD 时间（epoch 毫秒）
    fn osd_time(&self) -> Option<i64>;

    fn set_verify_code(&self, verify_code: &str) -> Result<(), SdkError>;

    fn open_sound(&self) -> Result<bool, SdkError>;

    fn close_sound(&self) -> Result<bool, SdkError>;

    async fn start_voice_talk(&self) -> Result<bool, SdkError>;

    async fn stop_voice_talk(&self) -> Result<bool, SdkError>;

    /// 释放句柄，可重复调用
    async fn release(&self);
}

/// Camera SDK Port
#[async_trait]
pub trait CameraSdkPort: Send + Sync {
    /// SDK 版本号
    fn version(&self) -> String;

    /// 初始化 SDK（非幂等，调用方负责串行化）
    async fn init(&self, options: SdkInitOptions) -> Result<bool, SdkError>;

    /// 销毁 SDK
    async fn destroy(&self);

    fn enable_log(&self, enabled: bool);

    fn enable_p2p(&self, enabled: bool);

    fn set_access_token(&self, access_token: &str);

    async fn access_token(&self) -> Result<Option<AccessToken>, SdkError>;

    async fn set_server_url(&self, api_url: &str, auth_url: &str) -> Result<(), SdkError>;

    async fn device_info(&self, device_serial: &str) -> Result<Option<DeviceInfo>, SdkError>;

    async fn device_list(&self, page_start: i32, page_size: i32)
        -> Result<Vec<DeviceInfo>, SdkError>;

    async fn add_device(&self, device_serial: &str, verify_code: &str) -> Result<bool, SdkError>;

    async fn delete_device(&self, device_serial: &str) -> Result<bool, SdkError>;

    async fn probe_device(&self, device_serial: &str) -> Result<ProbeDeviceInfo, SdkError>;

    async fn area_list(&self) -> Result<Vec<AreaInfo>, SdkError>;

    async fn set_video_level(
        &self,
        device_serial: &str,
        camera_no: i32,
        video_level: i32,
    ) -> Result<bool, SdkError>;

    async fn control_ptz(
        &self,
        device_serial: &str,
        camera_no: i32,
        command: PtzCommand,
        action: PtzAction,
        speed: i32,
    ) -> Result<bool, SdkError>;

    /// 登录局域网设备
    async fn login_net_device(
        &self,
        user_name: &str,
        password: &str,
        ip_addr: &str,
        port: i32,
    ) -> Result<Option<NetDeviceInfo>, SdkError>;

    async fn logout_net_device(&self, user_id: i64) -> Result<bool, SdkError>;

    async fn net_control_ptz(
        &self,
        user_id: i64,
        channel_no: i32,
        command: PtzCommand,
        action: PtzAction,
    ) -> Result<bool, SdkError>;

    /// 按时间范围检索录像
    async fn search_records(
        &self,
        source: RecordSource,
        device_serial: &str,
        camera_no: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RecordFile>, SdkError>;

    async fn open_login_page(&self, area_id: Option<&str>) -> Result<(), SdkError>;

    async fn logout(&self) -> Result<(), SdkError>;

    /// 创建播放句柄，回调通过 `callbacks` 投递
    async fn create_player(
        &self,
        target: &PlayTarget,
        callbacks: PlayerCallbackSender,
    ) -> Result<Box<dyn PlayerHandle>, SdkError>;
}
