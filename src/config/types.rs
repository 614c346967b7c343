//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 相机 SDK 配置
    #[serde(default)]
    pub sdk: SdkConfig,

    /// 模拟 SDK 配置
    #[serde(default)]
    pub mock: MockConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// SDK 配置
///
/// `auto_init` 打开时，启动后立即以这些参数走一次 `initSDK`。
#[derive(Debug, Clone, Deserialize)]
pub struct SdkConfig {
    #[serde(default)]
    pub app_key: String,

    #[serde(default)]
    pub access_token: Option<String>,

    /// 开放平台地址，`initSDK` 未携带 baseUrl 时使用
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub enable_log: bool,

    #[serde(default)]
    pub enable_p2p: bool,

    #[serde(default)]
    pub auto_init: bool,
}

fn default_base_url() -> String {
    "https://open.ys7.com".to_string()
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            access_token: None,
            base_url: default_base_url(),
            enable_log: false,
            enable_p2p: false,
            auto_init: false,
        }
    }
}

/// 模拟 SDK 配置
#[derive(Debug, Clone, Deserialize)]
pub struct MockConfig {
    /// 每次 SDK 调用的模拟延迟（毫秒）
    #[serde(default)]
    pub latency_ms: u64,

    /// 是否预置演示设备
    #[serde(default = "default_seed_devices")]
    pub seed_devices: bool,
}

fn default_seed_devices() -> bool {
    true
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            seed_devices: default_seed_devices(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
