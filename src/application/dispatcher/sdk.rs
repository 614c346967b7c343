//! SDK Dispatcher - 全局通道

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::application::channels::GLOBAL_EVENT_CHANNEL;
use crate::application::commands::*;
use crate::application::error::{codes, ApplicationError};
use crate::application::lifecycle::SdkLifecycle;
use crate::application::player::PlayerSession;
use crate::application::ports::{CameraSdkPort, SdkInitOptions, StatusEmitter};
use crate::domain::{PlayTarget, RecordSource};

use super::{to_json, CallHandler};

/// 全局通道分发器
///
/// `initSDK` / `destroySDK` 持有生命周期写锁，其它命令在整个执行期间持有读锁。
/// 锁与播放视图共享，因此重新初始化不会与任何通道上进行中的 SDK 调用交错。
pub struct SdkDispatcher {
    sdk: Arc<dyn CameraSdkPort>,
    lifecycle: Arc<SdkLifecycle>,
    /// 对讲专用会话，事件发往全局事件通道
    voice_talk: PlayerSession,
    default_base_url: String,
}

impl SdkDispatcher {
    pub fn new(
        sdk: Arc<dyn CameraSdkPort>,
        lifecycle: Arc<SdkLifecycle>,
        emitter: Arc<dyn StatusEmitter>,
        default_base_url: impl Into<String>,
    ) -> Self {
        Self {
            voice_talk: PlayerSession::new(
                GLOBAL_EVENT_CHANNEL,
                Arc::clone(&sdk),
                Arc::clone(&lifecycle),
                emitter,
            ),
            sdk,
            lifecycle,
            default_base_url: default_base_url.into(),
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized().await
    }

    pub async fn dispatch(&self, call: MethodCall) -> CommandResult {
        let Some(method) = SdkMethod::parse(&call.method) else {
            tracing::debug!(method = %call.method, "Unknown SDK method");
            return CommandResult::NotImplemented;
        };
        let args = Arguments::from_value(call.arguments);
        tracing::debug!(method = %method, "Dispatching SDK command");

        let outcome = if method.is_lifecycle() {
            let mut initialized = self.lifecycle.write().await;
            self.run_lifecycle(method, &args, &mut initialized).await
        } else {
            let initialized = self.lifecycle.read().await;
            if method.requires_init() && !*initialized {
                Err(ApplicationError::SdkNotInitialized)
            } else {
                self.run(method, &args).await
            }
        };

        if let Err(e) = &outcome {
            tracing::warn!(method = %method, code = e.code(), error = %e, "SDK command failed");
        }
        CommandResult::from_outcome(outcome)
    }

    async fn run_lifecycle(
        &self,
        method: SdkMethod,
        args: &Arguments,
        initialized: &mut bool,
    ) -> Result<Value, ApplicationError> {
        match method {
            SdkMethod::InitSdk => {
                let args = InitSdkArgs::from_arguments(args);
                let base_url = args
                    .base_url
                    .unwrap_or_else(|| self.default_base_url.clone());
                let options = SdkInitOptions {
                    app_key: args.app_key,
                    access_token: args.access_token,
                    enable_log: args.enable_log,
                    enable_p2p: args.enable_p2p,
                    api_url: base_url.clone(),
                    auth_url: base_url.clone(),
                };

                let ok = self
                    .sdk
                    .init(options)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::INIT_SDK_ERROR))?;
                *initialized = ok;
                tracing::info!(
                    success = ok,
                    base_url = %base_url,
                    enable_log = args.enable_log,
                    enable_p2p = args.enable_p2p,
                    "SDK initialized"
                );
                Ok(Value::Bool(ok))
            }
            SdkMethod::DestroySdk => {
                self.voice_talk.release().await;
                self.sdk.destroy().await;
                *initialized = false;
                tracing::info!("SDK destroyed");
                Ok(Value::Bool(true))
            }
            other => Err(ApplicationError::internal(format!(
                "{} is not a lifecycle method",
                other
            ))),
        }
    }

    async fn run(&self, method: SdkMethod, args: &Arguments) -> Result<Value, ApplicationError> {
        let sdk = &self.sdk;
        match method {
            SdkMethod::PlatformVersion => Ok(Value::String(format!(
                "{} {}",
                std::env::consts::OS,
                std::env::consts::ARCH
            ))),
            SdkMethod::SdkVersion => Ok(Value::String(sdk.version())),

            SdkMethod::EnableLog => {
                sdk.enable_log(EnableLogArgs::from_arguments(args).enable_log);
                Ok(Value::Null)
            }
            SdkMethod::EnableP2p => {
                sdk.enable_p2p(EnableP2pArgs::from_arguments(args).enable_p2p);
                Ok(Value::Null)
            }
            SdkMethod::SetAccessToken => {
                sdk.set_access_token(&AccessTokenArgs::from_arguments(args).access_token);
                Ok(Value::Null)
            }
            SdkMethod::GetAccessToken => {
                let token = sdk
                    .access_token()
                    .await
                    .map_err(ApplicationError::sdk_with(codes::ACCESS_TOKEN_ERROR))?;
                to_json(token)
            }
            SdkMethod::SetServerUrl => {
                let args = ServerUrlArgs::from_arguments(args);
                sdk.set_server_url(&args.api_url, &args.auth_url)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::SERVER_URL_ERROR))?;
                Ok(Value::Bool(true))
            }

            SdkMethod::DeviceInfo => {
                let args = DeviceSerialArgs::from_arguments(args);
                let info = sdk
                    .device_info(&args.device_serial)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::DEVICE_INFO_ERROR))?;
                to_json(info)
            }
            SdkMethod::DeviceInfoList => {
                let page = DeviceListArgs::FULL_LIST;
                let devices = sdk
                    .device_list(page.page_start, page.page_size)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::DEVICE_LIST_ERROR))?;
                to_json(devices)
            }
            SdkMethod::DeviceList => {
                let page = DeviceListArgs::from_arguments(args);
                let devices = sdk
                    .device_list(page.page_start, page.page_size)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::DEVICE_LIST_ERROR))?;
                to_json(devices)
            }
            SdkMethod::AddDevice => {
                let args = AddDeviceArgs::from_arguments(args);
                let added = sdk
                    .add_device(&args.device_serial, &args.verify_code)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::ADD_DEVICE_ERROR))?;
                tracing::info!(device_serial = %args.device_serial, added = added, "Device added");
                Ok(Value::Bool(added))
            }
            SdkMethod::DeleteDevice => {
                let args = DeviceSerialArgs::from_arguments(args);
                let deleted = sdk
                    .delete_device(&args.device_serial)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::DELETE_DEVICE_ERROR))?;
                tracing::info!(device_serial = %args.device_serial, deleted = deleted, "Device deleted");
                Ok(Value::Bool(deleted))
            }
            SdkMethod::ProbeDeviceInfo => {
                let args = DeviceSerialArgs::from_arguments(args);
                let probe = sdk
                    .probe_device(&args.device_serial)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::PROBE_DEVICE_ERROR))?;
                to_json(probe)
            }
            SdkMethod::AreaList => {
                let areas = sdk
                    .area_list()
                    .await
                    .map_err(ApplicationError::sdk_with(codes::AREA_LIST_ERROR))?;
                to_json(areas)
            }
            SdkMethod::SetVideoLevel => {
                let args = VideoLevelArgs::from_arguments(args);
                let ok = sdk
                    .set_video_level(&args.device_serial, args.camera_id, args.video_level)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::VIDEO_LEVEL_ERROR))?;
                Ok(Value::Bool(ok))
            }

            SdkMethod::ControlPtz => {
                let args = ControlPtzArgs::from_arguments(args);
                let (command, action) = args.validate()?;
                let ok = sdk
                    .control_ptz(&args.device_serial, args.camera_id, command, action, args.speed)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::PTZ_ERROR))?;
                Ok(Value::Bool(ok))
            }
            SdkMethod::LoginNetDevice => {
                let args = LoginNetDeviceArgs::from_arguments(args);
                let info = sdk
                    .login_net_device(&args.user_id, &args.pwd, &args.ip_addr, args.port)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::NET_DEVICE_ERROR))?;
                tracing::info!(ip_addr = %args.ip_addr, port = args.port, ok = info.is_some(), "LAN device login");
                to_json(info)
            }
            SdkMethod::LogoutNetDevice => {
                let args = LogoutNetDeviceArgs::from_arguments(args);
                let ok = sdk
                    .logout_net_device(args.user_id)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::NET_DEVICE_ERROR))?;
                Ok(Value::Bool(ok))
            }
            SdkMethod::NetControlPtz => {
                let args = NetControlPtzArgs::from_arguments(args);
                let (command, action) = args.validate()?;
                let ok = sdk
                    .net_control_ptz(args.user_id, args.channel_no, command, action)
                    .await
                    .map_err(ApplicationError::sdk_with(codes::PTZ_ERROR))?;
                Ok(Value::Bool(ok))
            }

            SdkMethod::StartVoiceTalk => {
                let args = StartVoiceTalkArgs::from_arguments(args);
                let target = PlayTarget::device(args.device_serial, args.camera_no);
                let started = self
                    .voice_talk
                    .restart_voice_talk(target, args.verify_code.as_deref())
                    .await?;
                Ok(Value::Bool(started))
            }
            SdkMethod::StopVoiceTalk => Ok(Value::Bool(self.voice_talk.stop_voice_talk().await?)),

            SdkMethod::SearchRecordFile => {
                let args = SearchRecordArgs::from_arguments(args);
                let mut files = sdk
                    .search_records(
                        RecordSource::Cloud,
                        &args.device_serial,
                        args.camera_no,
                        millis_to_utc(args.start_time),
                        millis_to_utc(args.end_time),
                    )
                    .await
                    .map_err(ApplicationError::sdk_with(codes::SEARCH_RECORD_ERROR))?;
                if args.rec_type != 0 {
                    files.retain(|file| file.rec_type == args.rec_type);
                }
                to_json(files)
            }
            SdkMethod::SearchDeviceRecordFile => {
                let args = SearchRecordArgs::from_arguments(args);
                let files = sdk
                    .search_records(
                        RecordSource::Device,
                        &args.device_serial,
                        args.camera_no,
                        millis_to_utc(args.start_time),
                        millis_to_utc(args.end_time),
                    )
                    .await
                    .map_err(ApplicationError::sdk_with(codes::SEARCH_DEVICE_RECORD_ERROR))?;
                to_json(files)
            }

            SdkMethod::OpenLoginPage => {
                let args = LoginPageArgs::from_arguments(args);
                sdk.open_login_page(args.area_id.as_deref())
                    .await
                    .map_err(ApplicationError::sdk_with(codes::LOGIN_PAGE_ERROR))?;
                Ok(Value::Bool(true))
            }
            SdkMethod::Logout => {
                sdk.logout()
                    .await
                    .map_err(ApplicationError::sdk_with(codes::LOGOUT_ERROR))?;
                Ok(Value::Bool(true))
            }

            SdkMethod::StartConfigWifi => {
                let args = ConfigWifiArgs::from_arguments(args);
                tracing::info!(device_serial = %args.device_serial, ssid = %args.ssid, "Wi-Fi provisioning requested");
                Err(ApplicationError::unsupported(method.as_str()))
            }
            SdkMethod::StopConfigWifi => Ok(Value::Bool(true)),

            SdkMethod::InitSdk | SdkMethod::DestroySdk => Err(ApplicationError::internal(format!(
                "{} must run under the lifecycle lock",
                method
            ))),
        }
    }
}

#[async_trait]
impl CallHandler for SdkDispatcher {
    async fn handle(&self, call: MethodCall) -> CommandResult {
        self.dispatch(call).await
    }
}

fn millis_to_utc(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SdkError;
    use crate::application::test_support::{add_device, emitter, RecordingEmitter};
    use crate::domain::{PlayerStatus, RecordFile};
    use crate::infrastructure::adapters::sdk::MockCameraSdk;
    use chrono::TimeZone;
    use serde_json::json;

    const BASE_URL: &str = "https://open.example.com";

    fn dispatcher() -> (SdkDispatcher, Arc<MockCameraSdk>, Arc<RecordingEmitter>) {
        let sdk = Arc::new(MockCameraSdk::default());
        let events = emitter();
        let dispatcher = SdkDispatcher::new(
            sdk.clone(),
            SdkLifecycle::default().arc(),
            events.clone(),
            BASE_URL,
        );
        (dispatcher, sdk, events)
    }

    async fn ready() -> (SdkDispatcher, Arc<MockCameraSdk>, Arc<RecordingEmitter>) {
        let (dispatcher, sdk, events) = dispatcher();
        let result = dispatcher
            .dispatch(MethodCall::new("initSDK", json!({ "appKey": "key" })))
            .await;
        assert_eq!(result.value(), Some(&json!(true)));
        (dispatcher, sdk, events)
    }

    async fn call(dispatcher: &SdkDispatcher, method: &str, args: Value) -> CommandResult {
        dispatcher.dispatch(MethodCall::new(method, args)).await
    }

    #[tokio::test]
    async fn test_unknown_method_not_implemented() {
        let (dispatcher, _sdk, _events) = dispatcher();
        let result = call(&dispatcher, "rebootDevice", json!({})).await;
        assert_eq!(result, CommandResult::NotImplemented);
    }

    #[tokio::test]
    async fn test_commands_before_init_fail() {
        let (dispatcher, sdk, _events) = dispatcher();
        let result = call(&dispatcher, "getDeviceList", json!({})).await;
        assert_eq!(result.error_code(), Some(codes::SDK_NOT_INITIALIZED));
        assert!(sdk.calls().is_empty());

        let version = call(&dispatcher, "getPlatformVersion", Value::Null).await;
        assert!(version.is_success());
    }

    #[tokio::test]
    async fn test_init_defaults() {
        let (dispatcher, sdk, _events) = ready().await;
        assert!(dispatcher.is_initialized().await);
        assert!(!sdk.log_enabled());
        assert!(!sdk.p2p_enabled());
        assert_eq!(
            sdk.server_url(),
            Some((BASE_URL.to_string(), BASE_URL.to_string()))
        );
    }

    #[tokio::test]
    async fn test_init_with_base_url_and_flags() {
        let (dispatcher, sdk, _events) = dispatcher();
        call(
            &dispatcher,
            "initSDK",
            json!({
                "appKey": "key",
                "enableLog": true,
                "enableP2P": "yes",
                "baseUrl": "https://iindiaopen.example.com",
            }),
        )
        .await;

        assert!(sdk.log_enabled());
        assert!(!sdk.p2p_enabled());
        assert_eq!(
            sdk.server_url().map(|(api, _)| api),
            Some("https://iindiaopen.example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_init_stays_uninitialized() {
        let (dispatcher, _sdk, _events) = dispatcher();
        let result = call(&dispatcher, "initSDK", json!({})).await;
        assert_eq!(result.value(), Some(&json!(false)));
        assert!(!dispatcher.is_initialized().await);
    }

    #[tokio::test]
    async fn test_init_error_code() {
        let (dispatcher, sdk, _events) = dispatcher();
        sdk.fail_next("init", SdkError::vendor(10001, "invalid app key"));
        let result = call(&dispatcher, "initSDK", json!({ "appKey": "key" })).await;
        assert_eq!(result.error_code(), Some(codes::INIT_SDK_ERROR));
    }

    #[tokio::test]
    async fn test_destroy_requires_reinit() {
        let (dispatcher, _sdk, _events) = ready().await;
        let result = call(&dispatcher, "destroySDK", Value::Null).await;
        assert_eq!(result.value(), Some(&json!(true)));

        let result = call(&dispatcher, "getAreaList", Value::Null).await;
        assert_eq!(result.error_code(), Some(codes::SDK_NOT_INITIALIZED));
    }

    #[tokio::test]
    async fn test_device_list_default_page() {
        let (dispatcher, sdk, _events) = ready().await;
        for i in 0..12 {
            add_device(&sdk, &format!("S{:02}", i), 1);
        }

        let page = call(&dispatcher, "getDeviceList", json!({})).await;
        assert_eq!(page.value().and_then(|v| v.as_array()).map(|a| a.len()), Some(10));

        let second = call(&dispatcher, "getDeviceList", json!({ "pageStart": 1 })).await;
        assert_eq!(second.value().and_then(|v| v.as_array()).map(|a| a.len()), Some(2));

        let all = call(&dispatcher, "getDeviceInfoList", Value::Null).await;
        assert_eq!(all.value().and_then(|v| v.as_array()).map(|a| a.len()), Some(12));
    }

    #[tokio::test]
    async fn test_empty_lists_are_arrays() {
        let (dispatcher, _sdk, _events) = ready().await;
        let devices = call(&dispatcher, "getDeviceInfoList", Value::Null).await;
        assert_eq!(devices.value(), Some(&json!([])));

        let records = call(
            &dispatcher,
            "searchRecordFile",
            json!({ "deviceSerial": "A1", "startTime": 0, "endTime": 1000 }),
        )
        .await;
        assert_eq!(records.value(), Some(&json!([])));

        let info = call(&dispatcher, "getDeviceInfo", json!({ "deviceSerial": "nope" })).await;
        assert_eq!(info.value(), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_device_info_shape() {
        let (dispatcher, sdk, _events) = ready().await;
        add_device(&sdk, "A1", 2);
        let info = call(&dispatcher, "getDeviceInfo", json!({ "deviceSerial": "A1" })).await;
        let value = info.value().unwrap();
        assert_eq!(value["deviceSerial"], "A1");
        assert_eq!(value["isSupportPTZ"], true);
        assert_eq!(value["cameraInfoList"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_ptz_skips_sdk() {
        let (dispatcher, sdk, _events) = ready().await;
        add_device(&sdk, "A1", 1);

        let result = call(
            &dispatcher,
            "controlPTZ",
            json!({ "deviceSerial": "A1", "command": "EZPTZCommand_Spin", "action": "EZPTZAction_START" }),
        )
        .await;
        assert_eq!(result.error_code(), Some(codes::INVALID_PTZ_COMMAND));

        let result = call(
            &dispatcher,
            "netControlPTZ",
            json!({ "userId": 1, "command": "EZPTZCommand_Up", "action": "GO" }),
        )
        .await;
        assert_eq!(result.error_code(), Some(codes::INVALID_PTZ_ACTION));

        assert!(!sdk.ops().contains(&"control_ptz"));
        assert!(!sdk.ops().contains(&"net_control_ptz"));
    }

    #[tokio::test]
    async fn test_ptz_vendor_error_details() {
        let (dispatcher, sdk, _events) = ready().await;
        add_device(&sdk, "A1", 1);
        sdk.fail_next("control_ptz", SdkError::vendor(160002, "PTZ busy"));

        let result = call(
            &dispatcher,
            "controlPTZ",
            json!({
                "deviceSerial": "A1",
                "cameraId": 1,
                "command": "EZPTZCommand_Left",
                "action": "EZPTZAction_START",
                "speed": 1,
            }),
        )
        .await;
        match result {
            CommandResult::Error { code, details, .. } => {
                assert_eq!(code, codes::PTZ_ERROR);
                assert_eq!(details, Some(json!({ "sdkCode": 160002 })));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_records_window() {
        let (dispatcher, sdk, _events) = ready().await;
        let at = |ms| Utc.timestamp_millis_opt(ms).unwrap();
        sdk.insert_records(
            RecordSource::Device,
            "A1",
            1,
            vec![RecordFile::new(at(1_000), at(2_000), 10)],
        );

        let result = call(
            &dispatcher,
            "searchDeviceRecordFile",
            json!({ "deviceSerial": "A1", "startTime": 0, "endTime": 5_000 }),
        )
        .await;
        let files = result.value().unwrap().as_array().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["startTime"], 1_000);
        assert_eq!(files[0]["endTime"], 2_000);
    }

    #[tokio::test]
    async fn test_voice_talk_defaults_to_camera_one() {
        let (dispatcher, sdk, events) = ready().await;
        add_device(&sdk, "A1", 2);

        let result = call(&dispatcher, "startVoiceTalk", json!({ "deviceSerial": "A1" })).await;
        assert_eq!(result.value(), Some(&json!(true)));
        assert!(sdk
            .calls()
            .iter()
            .any(|c| c.op == "create_player" && c.subject.as_deref() == Some("device:A1/1")));
        assert_eq!(
            events.statuses(GLOBAL_EVENT_CHANNEL),
            vec![PlayerStatus::Init, PlayerStatus::Start]
        );

        let stopped = call(&dispatcher, "stopVoiceTalk", Value::Null).await;
        assert_eq!(stopped.value(), Some(&json!(true)));
        assert_eq!(sdk.live_handle_count(), 0);
    }

    #[tokio::test]
    async fn test_stop_voice_talk_when_idle() {
        let (dispatcher, _sdk, events) = ready().await;
        let stopped = call(&dispatcher, "stopVoiceTalk", Value::Null).await;
        assert_eq!(stopped.value(), Some(&json!(true)));
        assert_eq!(events.total(), 0);
    }

    #[tokio::test]
    async fn test_voice_talk_unknown_device() {
        let (dispatcher, _sdk, _events) = ready().await;
        let result = call(&dispatcher, "startVoiceTalk", json!({ "deviceSerial": "ghost" })).await;
        assert_eq!(result.error_code(), Some(codes::VOICE_TALK_ERROR));
    }

    #[tokio::test]
    async fn test_net_device_flow() {
        let (dispatcher, _sdk, _events) = ready().await;
        let login = call(
            &dispatcher,
            "loginNetDevice",
            json!({ "userId": "admin", "pwd": "secret", "ipAddr": "10.0.0.8", "port": 8000 }),
        )
        .await;
        let user_id = login.value().unwrap()["userId"].as_i64().unwrap();

        let ptz = call(
            &dispatcher,
            "netControlPTZ",
            json!({
                "userId": user_id,
                "channelNo": 1,
                "command": "EZPTZCommand_ZoomIn",
                "action": "EZPTZAction_STOP",
            }),
        )
        .await;
        assert_eq!(ptz.value(), Some(&json!(true)));

        let logout = call(&dispatcher, "logoutNetDevice", json!({ "userId": user_id })).await;
        assert_eq!(logout.value(), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_access_token_round_trip() {
        let (dispatcher, _sdk, _events) = ready().await;
        call(&dispatcher, "setAccessToken", json!({ "accessToken": "at.123" })).await;
        let token = call(&dispatcher, "getAccessToken", Value::Null).await;
        assert_eq!(token.value().unwrap()["accessToken"], "at.123");

        call(&dispatcher, "logout", Value::Null).await;
        let token = call(&dispatcher, "getAccessToken", Value::Null).await;
        assert_eq!(token.value(), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_config_wifi() {
        let (dispatcher, _sdk, _events) = dispatcher();
        let start = call(&dispatcher, "startConfigWifi", json!({ "ssid": "home" })).await;
        assert_eq!(start.error_code(), Some(codes::UNSUPPORTED));
        let stop = call(&dispatcher, "stopConfigWifi", Value::Null).await;
        assert_eq!(stop.value(), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_enable_log_before_init() {
        let (dispatcher, sdk, _events) = dispatcher();
        let result = call(&dispatcher, "enableLog", json!({ "enableLog": true })).await;
        assert_eq!(result.value(), Some(&Value::Null));
        assert!(sdk.log_enabled());
    }

    #[tokio::test]
    async fn test_every_method_is_dispatched() {
        let (dispatcher, _sdk, _events) = ready().await;
        for method in SdkMethod::ALL {
            let result = call(&dispatcher, method.as_str(), json!({})).await;
            assert_ne!(result, CommandResult::NotImplemented, "{}", method);
        }
    }
}
