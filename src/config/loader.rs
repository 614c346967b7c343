//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml / config.local.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径，后者覆盖前者
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `CAMLINK_SERVER__PORT=8080`
/// - `CAMLINK_SDK__APP_KEY=xxxx`
/// - `CAMLINK_SDK__AUTO_INIT=true`
/// - `CAMLINK_MOCK__LATENCY_MS=50`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索工作目录下的默认配置文件
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("sdk.app_key", "")?
        .set_default("sdk.base_url", "https://open.ys7.com")?
        .set_default("sdk.enable_log", false)?
        .set_default("sdk.enable_p2p", false)?
        .set_default("sdk.auto_init", false)?
        .set_default("mock.latency_ms", 0)?
        .set_default("mock.seed_devices", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: CAMLINK_SDK__BASE_URL=https://open.example.com
    builder = builder.add_source(
        Environment::with_prefix("CAMLINK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.sdk.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "SDK base URL cannot be empty".to_string(),
        ));
    }

    if config.sdk.auto_init && config.sdk.app_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "SDK app key is required when auto_init is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("SDK Base URL: {}", config.sdk.base_url);
    tracing::info!(
        "SDK Auto Init: {} (log: {}, p2p: {})",
        config.sdk.auto_init,
        config.sdk.enable_log,
        config.sdk.enable_p2p
    );
    tracing::info!("SDK Access Token: {}", if config.sdk.access_token.is_some() { "set" } else { "unset" });
    tracing::info!("Mock Latency: {}ms", config.mock.latency_ms);
    tracing::info!("Mock Demo Devices: {}", config.mock.seed_devices);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5060);
        assert_eq!(config.sdk.base_url, "https://open.ys7.com");
        assert!(config.mock.seed_devices);
        assert!(!config.sdk.auto_init);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_base_url() {
        let mut config = AppConfig::default();
        config.sdk.base_url = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_auto_init_without_key() {
        let mut config = AppConfig::default();
        config.sdk.auto_init = true;
        assert!(validate_config(&config).is_err());

        config.sdk.app_key = "key".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000

[sdk]
app_key = "demo"
auto_init = true
access_token = "at.123"

[mock]
latency_ms = 25
seed_devices = false
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.sdk.app_key, "demo");
        assert!(config.sdk.auto_init);
        assert_eq!(config.sdk.access_token.as_deref(), Some("at.123"));
        assert_eq!(config.mock.latency_ms, 25);
        assert!(!config.mock.seed_devices);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 0").unwrap();

        let err = load_config_from_path(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
