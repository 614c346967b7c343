//! Mock Camera SDK

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::application::ports::{
    CameraSdkPort, PlayerCallback, PlayerCallbackSender, PlayerHandle, SdkError, SdkInitOptions,
};
use crate::domain::{
    AccessToken, AreaInfo, CameraInfo, DeviceInfo, NetDeviceInfo, PlayTarget, ProbeDeviceInfo,
    PtzAction, PtzCommand, RecordFile, RecordSource,
};

use super::mock_player::MockPlayerHandle;

/// 厂商错误码
const ERR_DEVICE_ALREADY_ADDED: i32 = 120017;
const ERR_PTZ_NOT_SUPPORTED: i32 = 160020;
const ERR_CAMERA_NOT_FOUND: i32 = 120002;

/// access token 有效期（7 天）
const TOKEN_TTL_MS: i64 = 7 * 24 * 3600 * 1000;

/// Mock SDK 配置
#[derive(Debug, Clone, Default)]
pub struct MockSdkConfig {
    /// 每次调用的模拟延迟
    pub latency: Duration,
    /// 预置演示设备与录像
    pub seed_demo_devices: bool,
}

/// 一次 SDK 调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkCall {
    pub op: &'static str,
    /// 句柄 ID 或设备序列号
    pub subject: Option<String>,
}

/// SDK 与句柄共享的内部状态
pub(super) struct MockState {
    pub(super) latency: Duration,
    initialized: AtomicBool,
    log_enabled: AtomicBool,
    p2p_enabled: AtomicBool,
    access_token: Mutex<Option<AccessToken>>,
    server_url: Mutex<Option<(String, String)>>,
    pub(super) devices: DashMap<String, DeviceInfo>,
    pub(super) verify_codes: DashMap<String, String>,
    records: DashMap<(RecordSource, String, i32), Vec<RecordFile>>,
    net_users: DashMap<i64, NetDeviceInfo>,
    next_user_id: AtomicI64,
    failures: DashMap<&'static str, SdkError>,
    pub(super) callbacks: DashMap<String, PlayerCallbackSender>,
    calls: Mutex<Vec<SdkCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockState {
    pub(super) fn record(&self, op: &'static str, subject: Option<&str>) {
        lock(&self.calls).push(SdkCall {
            op,
            subject: subject.map(str::to_string),
        });
    }

    /// 取出预设的一次性失败
    pub(super) fn take_failure(&self, op: &'static str) -> Option<SdkError> {
        self.failures.remove(op).map(|(_, err)| err)
    }

    pub(super) async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// 设备（或其通道）是否加密且句柄验证码不匹配
    pub(super) fn needs_verify_code(&self, target: &PlayTarget, verify_code: Option<&str>) -> bool {
        let Some((serial, camera_no)) = target.device_channel() else {
            return false;
        };
        let Some(device) = self.devices.get(serial) else {
            return false;
        };
        let encrypted = device.is_encrypt
            || device
                .camera(camera_no)
                .map(|camera| camera.is_encrypt)
                .unwrap_or(false);
        if !encrypted {
            return false;
        }
        match self.verify_codes.get(serial) {
            Some(expected) => verify_code != Some(expected.as_str()),
            None => false,
        }
    }
}

/// 内存模拟 SDK
pub struct MockCameraSdk {
    state: Arc<MockState>,
}

impl MockCameraSdk {
    pub fn new(config: MockSdkConfig) -> Self {
        let sdk = Self {
            state: Arc::new(MockState {
                latency: config.latency,
                initialized: AtomicBool::new(false),
                log_enabled: AtomicBool::new(false),
                p2p_enabled: AtomicBool::new(false),
                access_token: Mutex::new(None),
                server_url: Mutex::new(None),
                devices: DashMap::new(),
                verify_codes: DashMap::new(),
                records: DashMap::new(),
                net_users: DashMap::new(),
                next_user_id: AtomicI64::new(1),
                failures: DashMap::new(),
                callbacks: DashMap::new(),
                calls: Mutex::new(Vec::new()),
            }),
        };

        if config.seed_demo_devices {
            sdk.seed_demo();
        }

        tracing::info!(
            latency_ms = config.latency.as_millis() as u64,
            seed_demo_devices = config.seed_demo_devices,
            "MockCameraSdk created"
        );
        sdk
    }

    fn seed_demo(&self) {
        let ptz_camera = DeviceInfo {
            device_serial: "D00000001".to_string(),
            device_name: "Front Door".to_string(),
            device_type: "CS-C6N".to_string(),
            status: 1,
            is_encrypt: false,
            is_support_ptz: true,
            camera_num: 1,
            camera_info_list: vec![demo_camera("D00000001", 1, "Front Door", false)],
        };
        let encrypted_nvr = DeviceInfo {
            device_serial: "D00000002".to_string(),
            device_name: "Garage NVR".to_string(),
            device_type: "CS-X3".to_string(),
            status: 1,
            is_encrypt: true,
            is_support_ptz: false,
            camera_num: 2,
            camera_info_list: vec![
                demo_camera("D00000002", 1, "Garage", true),
                demo_camera("D00000002", 2, "Driveway", true),
            ],
        };

        self.insert_device(ptz_camera);
        self.insert_device(encrypted_nvr);
        self.set_device_verify_code("D00000002", "ABCDEF");

        // 最近 24 小时，每小时一段录像
        let now = Utc::now();
        let hourly: Vec<RecordFile> = (1..=24)
            .rev()
            .map(|h| {
                let start = now - chrono::Duration::hours(h);
                let end = start + chrono::Duration::minutes(55);
                RecordFile::new(start, end, 64 * 1024 * 1024)
            })
            .collect();
        for source in [RecordSource::Device, RecordSource::Cloud] {
            self.insert_records(source, "D00000001", 1, hourly.clone());
        }
    }

    /// 预置设备
    pub fn insert_device(&self, device: DeviceInfo) {
        self.state
            .devices
            .insert(device.device_serial.clone(), device);
    }

    /// 设置设备验证码（加密设备播放需要）
    pub fn set_device_verify_code(&self, device_serial: &str, verify_code: &str) {
        self.state
            .verify_codes
            .insert(device_serial.to_string(), verify_code.to_string());
    }

    /// 预置录像
    pub fn insert_records(
        &self,
        source: RecordSource,
        device_serial: &str,
        camera_no: i32,
        files: Vec<RecordFile>,
    ) {
        self.state
            .records
            .insert((source, device_serial.to_string(), camera_no), files);
    }

    /// 让下一次 `op` 调用失败
    pub fn fail_next(&self, op: &'static str, err: SdkError) {
        self.state.failures.insert(op, err);
    }

    /// 向指定句柄投递一个回调，句柄已释放时返回 false
    pub fn inject_callback(&self, handle_id: &str, callback: PlayerCallback) -> bool {
        match self.state.callbacks.get(handle_id) {
            Some(sender) => sender.send(callback).is_ok(),
            None => false,
        }
    }

    pub fn live_handle_ids(&self) -> Vec<String> {
        self.state
            .callbacks
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn live_handle_count(&self) -> usize {
        self.state.callbacks.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized.load(Ordering::SeqCst)
    }

    pub fn log_enabled(&self) -> bool {
        self.state.log_enabled.load(Ordering::SeqCst)
    }

    pub fn p2p_enabled(&self) -> bool {
        self.state.p2p_enabled.load(Ordering::SeqCst)
    }

    pub fn server_url(&self) -> Option<(String, String)> {
        lock(&self.state.server_url).clone()
    }

    /// 调用流水
    pub fn calls(&self) -> Vec<SdkCall> {
        lock(&self.state.calls).clone()
    }

    /// 只看操作名
    pub fn ops(&self) -> Vec<&'static str> {
        lock(&self.state.calls).iter().map(|call| call.op).collect()
    }

    async fn enter(&self, op: &'static str, subject: Option<&str>) -> Result<(), SdkError> {
        self.state.record(op, subject);
        self.state.delay().await;
        if let Some(err) = self.state.take_failure(op) {
            return Err(err);
        }
        if !self.is_initialized() {
            return Err(SdkError::NotInitialized);
        }
        Ok(())
    }

    fn store_token(&self, access_token: &str) {
        let token = (!access_token.is_empty()).then(|| AccessToken {
            access_token: access_token.to_string(),
            expire_time: Utc::now().timestamp_millis() + TOKEN_TTL_MS,
        });
        *lock(&self.state.access_token) = token;
    }
}

impl Default for MockCameraSdk {
    fn default() -> Self {
        Self::new(MockSdkConfig::default())
    }
}

fn demo_camera(serial: &str, camera_no: i32, name: &str, is_encrypt: bool) -> CameraInfo {
    CameraInfo {
        device_serial: serial.to_string(),
        camera_no,
        camera_name: name.to_string(),
        status: 1,
        is_encrypt,
        video_level: 2,
    }
}

#[async_trait]
impl CameraSdkPort for MockCameraSdk {
    fn version(&self) -> String {
        format!("mock-{}", env!("CARGO_PKG_VERSION"))
    }

    async fn init(&self, options: SdkInitOptions) -> Result<bool, SdkError> {
        self.state.record("init", None);
        self.state.delay().await;
        if let Some(err) = self.state.take_failure("init") {
            return Err(err);
        }
        if options.app_key.is_empty() {
            tracing::warn!("MockCameraSdk: empty app key, refusing to initialize");
            return Ok(false);
        }

        self.enable_log(options.enable_log);
        self.enable_p2p(options.enable_p2p);
        self.store_token(&options.access_token);
        *lock(&self.state.server_url) = Some((options.api_url, options.auth_url));
        self.state.initialized.store(true, Ordering::SeqCst);
        Ok(true)
    }

    async fn destroy(&self) {
        self.state.record("destroy", None);
        self.state.initialized.store(false, Ordering::SeqCst);
        self.state.callbacks.clear();
        self.state.net_users.clear();
    }

    fn enable_log(&self, enabled: bool) {
        self.state.log_enabled.store(enabled, Ordering::SeqCst);
    }

    fn enable_p2p(&self, enabled: bool) {
        self.state.p2p_enabled.store(enabled, Ordering::SeqCst);
    }

    fn set_access_token(&self, access_token: &str) {
        self.state.record("set_access_token", None);
        self.store_token(access_token);
    }

    async fn access_token(&self) -> Result<Option<AccessToken>, SdkError> {
        self.enter("access_token", None).await?;
        Ok(lock(&self.state.access_token).clone())
    }

    async fn set_server_url(&self, api_url: &str, auth_url: &str) -> Result<(), SdkError> {
        self.enter("set_server_url", None).await?;
        *lock(&self.state.server_url) = Some((api_url.to_string(), auth_url.to_string()));
        Ok(())
    }

    async fn device_info(&self, device_serial: &str) -> Result<Option<DeviceInfo>, SdkError> {
        self.enter("device_info", Some(device_serial)).await?;
        Ok(self
            .state
            .devices
            .get(device_serial)
            .map(|device| device.clone()))
    }

    async fn device_list(&self, page_start: i32, page_size: i32) -> Result<Vec<DeviceInfo>, SdkError> {
        self.enter("device_list", None).await?;
        let mut devices: Vec<DeviceInfo> = self
            .state
            .devices
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        devices.sort_by(|a, b| a.device_serial.cmp(&b.device_serial));

        let size = page_size.max(0) as usize;
        let skip = (page_start.max(0) as usize).saturating_mul(size);
        Ok(devices.into_iter().skip(skip).take(size).collect())
    }

    async fn add_device(&self, device_serial: &str, verify_code: &str) -> Result<bool, SdkError> {
        self.enter("add_device", Some(device_serial)).await?;
        if self.state.devices.contains_key(device_serial) {
            return Err(SdkError::vendor(
                ERR_DEVICE_ALREADY_ADDED,
                "The device has been added by yourself",
            ));
        }

        self.insert_device(DeviceInfo {
            device_serial: device_serial.to_string(),
            device_name: device_serial.to_string(),
            device_type: "CS-MOCK".to_string(),
            status: 1,
            camera_num: 1,
            camera_info_list: vec![demo_camera(device_serial, 1, device_serial, false)],
            ..Default::default()
        });
        if !verify_code.is_empty() {
            self.set_device_verify_code(device_serial, verify_code);
        }
        Ok(true)
    }

    async fn delete_device(&self, device_serial: &str) -> Result<bool, SdkError> {
        self.enter("delete_device", Some(device_serial)).await?;
        self.state.verify_codes.remove(device_serial);
        match self.state.devices.remove(device_serial) {
            Some(_) => Ok(true),
            None => Err(SdkError::DeviceNotFound(device_serial.to_string())),
        }
    }

    async fn probe_device(&self, device_serial: &str) -> Result<ProbeDeviceInfo, SdkError> {
        self.enter("probe_device", Some(device_serial)).await?;
        let known = self.state.devices.get(device_serial).map(|d| d.clone());
        Ok(ProbeDeviceInfo {
            device_serial: device_serial.to_string(),
            device_name: known
                .as_ref()
                .map(|d| d.device_name.clone())
                .unwrap_or_default(),
            device_type: known
                .as_ref()
                .map(|d| d.device_type.clone())
                .unwrap_or_else(|| "CS-MOCK".to_string()),
            status: 1,
            support_wifi: true,
            net_type: "wireless".to_string(),
        })
    }

    async fn area_list(&self) -> Result<Vec<AreaInfo>, SdkError> {
        self.enter("area_list", None).await?;
        Ok([("314", "Asia"), ("315", "Europe"), ("316", "North America")]
            .into_iter()
            .map(|(id, name)| AreaInfo {
                area_id: id.to_string(),
                area_name: name.to_string(),
            })
            .collect())
    }

    async fn set_video_level(
        &self,
        device_serial: &str,
        camera_no: i32,
        video_level: i32,
    ) -> Result<bool, SdkError> {
        self.enter("set_video_level", Some(device_serial)).await?;
        let mut device = self
            .state
            .devices
            .get_mut(device_serial)
            .ok_or_else(|| SdkError::DeviceNotFound(device_serial.to_string()))?;
        let camera = device
            .camera_info_list
            .iter_mut()
            .find(|c| c.camera_no == camera_no)
            .ok_or_else(|| SdkError::vendor(ERR_CAMERA_NOT_FOUND, "Camera does not exist"))?;
        camera.video_level = video_level;
        Ok(true)
    }

    async fn control_ptz(
        &self,
        device_serial: &str,
        camera_no: i32,
        command: PtzCommand,
        action: PtzAction,
        speed: i32,
    ) -> Result<bool, SdkError> {
        self.enter("control_ptz", Some(device_serial)).await?;
        let device = self
            .state
            .devices
            .get(device_serial)
            .ok_or_else(|| SdkError::DeviceNotFound(device_serial.to_string()))?;
        if !device.is_support_ptz {
            return Err(SdkError::vendor(
                ERR_PTZ_NOT_SUPPORTED,
                "The device does not support PTZ",
            ));
        }
        tracing::debug!(
            device_serial = %device_serial,
            camera_no = camera_no,
            command = %command,
            action = %action,
            speed = speed,
            "MockCameraSdk: PTZ"
        );
        Ok(true)
    }

    async fn login_net_device(
        &self,
        user_name: &str,
        password: &str,
        ip_addr: &str,
        port: i32,
    ) -> Result<Option<NetDeviceInfo>, SdkError> {
        self.enter("login_net_device", Some(ip_addr)).await?;
        if user_name.is_empty() || password.is_empty() || port <= 0 {
            return Ok(None);
        }

        let user_id = self.state.next_user_id.fetch_add(1, Ordering::SeqCst);
        let info = NetDeviceInfo {
            user_id,
            channel_count: 4,
            start_channel_no: 1,
            d_start_channel_no: 33,
            d_channel_count: 0,
            by_dvr_type: 0,
        };
        self.state.net_users.insert(user_id, info.clone());
        Ok(Some(info))
    }

    async fn logout_net_device(&self, user_id: i64) -> Result<bool, SdkError> {
        self.enter("logout_net_device", None).await?;
        Ok(self.state.net_users.remove(&user_id).is_some())
    }

    async fn net_control_ptz(
        &self,
        user_id: i64,
        channel_no: i32,
        command: PtzCommand,
        action: PtzAction,
    ) -> Result<bool, SdkError> {
        self.enter("net_control_ptz", None).await?;
        let Some(info) = self.state.net_users.get(&user_id) else {
            return Ok(false);
        };
        let last = info.start_channel_no + info.channel_count;
        let in_range = channel_no >= info.start_channel_no && channel_no < last;
        tracing::debug!(
            user_id = user_id,
            channel_no = channel_no,
            command = %command,
            action = %action,
            "MockCameraSdk: LAN PTZ"
        );
        Ok(in_range)
    }

    async fn search_records(
        &self,
        source: RecordSource,
        device_serial: &str,
        camera_no: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RecordFile>, SdkError> {
        let op = match source {
            RecordSource::Cloud => "search_cloud_records",
            RecordSource::Device => "search_device_records",
        };
        self.enter(op, Some(device_serial)).await?;

        let (start_ms, end_ms) = (start.timestamp_millis(), end.timestamp_millis());
        Ok(self
            .state
            .records
            .get(&(source, device_serial.to_string(), camera_no))
            .map(|files| {
                files
                    .iter()
                    .filter(|file| file.overlaps(start_ms, end_ms))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn open_login_page(&self, area_id: Option<&str>) -> Result<(), SdkError> {
        self.enter("open_login_page", area_id).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), SdkError> {
        self.enter("logout", None).await?;
        *lock(&self.state.access_token) = None;
        Ok(())
    }

    async fn create_player(
        &self,
        target: &PlayTarget,
        callbacks: PlayerCallbackSender,
    ) -> Result<Box<dyn PlayerHandle>, SdkError> {
        let subject = target.to_string();
        self.enter("create_player", Some(&subject)).await?;

        if let Some((serial, _)) = target.device_channel() {
            if !self.state.devices.contains_key(serial) {
                return Err(SdkError::DeviceNotFound(serial.to_string()));
            }
        }

        let handle = MockPlayerHandle::new(target.clone(), Arc::clone(&self.state), callbacks);
        tracing::debug!(handle_id = %handle.id(), target = %target, "MockCameraSdk: player created");
        Ok(Box::new(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn options() -> SdkInitOptions {
        SdkInitOptions {
            app_key: "key".to_string(),
            access_token: "token".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_rejects_calls_before_init() {
        let sdk = MockCameraSdk::default();
        let err = sdk.device_list(0, 10).await.unwrap_err();
        assert!(matches!(err, SdkError::NotInitialized));

        assert!(sdk.init(options()).await.unwrap());
        assert!(sdk.device_list(0, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_app_key_fails_init() {
        let sdk = MockCameraSdk::default();
        assert!(!sdk.init(SdkInitOptions::default()).await.unwrap());
        assert!(!sdk.is_initialized());
    }

    #[tokio::test]
    async fn test_device_list_pages() {
        let sdk = MockCameraSdk::new(MockSdkConfig {
            seed_demo_devices: true,
            ..Default::default()
        });
        sdk.init(options()).await.unwrap();

        let first = sdk.device_list(0, 1).await.unwrap();
        let second = sdk.device_list(1, 1).await.unwrap();
        assert_eq!(first[0].device_serial, "D00000001");
        assert_eq!(second[0].device_serial, "D00000002");
        assert!(sdk.device_list(2, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let sdk = MockCameraSdk::default();
        sdk.init(options()).await.unwrap();
        sdk.fail_next("area_list", SdkError::vendor(1, "boom"));

        assert!(sdk.area_list().await.is_err());
        assert_eq!(sdk.area_list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_filters_by_range() {
        let sdk = MockCameraSdk::default();
        sdk.init(options()).await.unwrap();
        let at = |ms| Utc.timestamp_millis_opt(ms).unwrap();
        sdk.insert_records(
            RecordSource::Device,
            "A1",
            1,
            vec![
                RecordFile::new(at(0), at(1_000), 1),
                RecordFile::new(at(5_000), at(6_000), 1),
            ],
        );

        let found = sdk
            .search_records(RecordSource::Device, "A1", 1, at(4_000), at(10_000))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start_time, 5_000);

        let cloud = sdk
            .search_records(RecordSource::Cloud, "A1", 1, at(0), at(10_000))
            .await
            .unwrap();
        assert!(cloud.is_empty());
    }

    #[tokio::test]
    async fn test_ptz_requires_support() {
        let sdk = MockCameraSdk::new(MockSdkConfig {
            seed_demo_devices: true,
            ..Default::default()
        });
        sdk.init(options()).await.unwrap();

        assert!(sdk
            .control_ptz("D00000001", 1, PtzCommand::Up, PtzAction::Start, 1)
            .await
            .unwrap());
        let err = sdk
            .control_ptz("D00000002", 1, PtzCommand::Up, PtzAction::Start, 1)
            .await
            .unwrap_err();
        assert_eq!(err.vendor_code(), Some(ERR_PTZ_NOT_SUPPORTED));
    }

    #[tokio::test]
    async fn test_net_device_login_cycle() {
        let sdk = MockCameraSdk::default();
        sdk.init(options()).await.unwrap();

        assert!(sdk
            .login_net_device("admin", "", "10.0.0.2", 8000)
            .await
            .unwrap()
            .is_none());

        let info = sdk
            .login_net_device("admin", "secret", "10.0.0.2", 8000)
            .await
            .unwrap()
            .unwrap();
        assert!(sdk
            .net_control_ptz(info.user_id, 1, PtzCommand::Left, PtzAction::Stop)
            .await
            .unwrap());
        assert!(sdk.logout_net_device(info.user_id).await.unwrap());
        assert!(!sdk.logout_net_device(info.user_id).await.unwrap());
    }
}
