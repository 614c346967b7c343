//! Camlink - 网络摄像机控制桥

use std::sync::Arc;
use std::time::Duration;

use camlink::application::{MethodCall, ViewRegistryPort};
use camlink::config::{load_config, print_config, AppConfig, SdkConfig};
use camlink::infrastructure::http::{AppState, HttpServer};
use camlink::infrastructure::{
    EventHub, InMemoryViewRegistry, MainContext, MockCameraSdk, MockSdkConfig,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Camlink - 网络摄像机控制桥");
    print_config(&config);

    let sdk = Arc::new(MockCameraSdk::new(MockSdkConfig {
        latency: Duration::from_millis(config.mock.latency_ms),
        seed_demo_devices: config.mock.seed_devices,
    }));

    let (main_context, main_loop) = MainContext::start();
    let events = EventHub::new(main_context.clone()).arc();
    let views: Arc<dyn ViewRegistryPort> = InMemoryViewRegistry::new().arc();

    let state = Arc::new(AppState::new(
        sdk,
        events,
        views.clone(),
        main_context,
        config.sdk.base_url.clone(),
    ));

    if config.sdk.auto_init {
        let result = state.global_channel.call(init_call(&config.sdk)).await;
        if result.is_success() {
            tracing::info!("SDK initialized from configuration");
        } else {
            tracing::warn!(result = ?result, "SDK auto init failed");
        }
    }

    let server = HttpServer::new(config.server.clone(), state.clone());

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    // 释放残留的播放视图与 SDK
    for view_id in views.list_ids() {
        if let Some(view) = views.remove(view_id) {
            view.dispose().await;
        }
    }
    state
        .global_channel
        .call(MethodCall::bare("destroySDK"))
        .await;

    drop(state);
    main_loop.abort();

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},camlink={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 以配置参数构造 initSDK 调用
fn init_call(sdk: &SdkConfig) -> MethodCall {
    MethodCall::new(
        "initSDK",
        json!({
            "appKey": sdk.app_key,
            "accessToken": sdk.access_token.clone().unwrap_or_default(),
            "enableLog": sdk.enable_log,
            "enableP2P": sdk.enable_p2p,
            "baseUrl": sdk.base_url,
        }),
    )
}
