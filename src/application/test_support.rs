//! 测试辅助

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::ports::{SdkInitOptions, StatusEmitter};
use crate::domain::{PlayerStatus, StatusEvent, StatusPayload};
use crate::infrastructure::adapters::sdk::{MockCameraSdk, MockSdkConfig};

/// 记录所有推送事件
#[derive(Default)]
pub struct RecordingEmitter {
    events: Mutex<Vec<(String, StatusEvent)>>,
}

impl StatusEmitter for RecordingEmitter {
    fn emit(&self, channel: &str, event: StatusEvent) {
        self.events.lock().unwrap().push((channel.to_string(), event));
    }
}

impl RecordingEmitter {
    pub fn payloads(&self, channel: &str) -> Vec<StatusPayload> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(ch, _)| ch == channel)
            .map(|(_, event)| event.payload().expect("status payload"))
            .collect()
    }

    pub fn statuses(&self, channel: &str) -> Vec<PlayerStatus> {
        self.payloads(channel)
            .into_iter()
            .map(|p| PlayerStatus::from_code(p.status).expect("known status code"))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// 等待某个通道出现满足条件的事件
    pub async fn wait_for(&self, channel: &str, pred: impl Fn(&StatusPayload) -> bool) -> StatusPayload {
        for _ in 0..200 {
            if let Some(found) = self.payloads(channel).into_iter().find(|p| pred(p)) {
                return found;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no matching event on {}: {:?}", channel, self.payloads(channel));
    }
}

pub fn emitter() -> Arc<RecordingEmitter> {
    Arc::new(RecordingEmitter::default())
}

/// 已初始化的 mock SDK
pub async fn ready_sdk() -> Arc<MockCameraSdk> {
    init_sdk(MockCameraSdk::default()).await
}

/// 每次调用都带延迟的已初始化 mock SDK
pub async fn slow_sdk(latency: Duration) -> Arc<MockCameraSdk> {
    init_sdk(MockCameraSdk::new(MockSdkConfig {
        latency,
        seed_demo_devices: false,
    }))
    .await
}

async fn init_sdk(sdk: MockCameraSdk) -> Arc<MockCameraSdk> {
    use crate::application::ports::CameraSdkPort;

    let sdk = Arc::new(sdk);
    sdk.init(SdkInitOptions {
        app_key: "test-key".to_string(),
        access_token: "test-token".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();
    sdk
}

/// 插入一台普通设备
pub fn add_device(sdk: &MockCameraSdk, serial: &str, cameras: i32) {
    use crate::domain::{CameraInfo, DeviceInfo};

    sdk.insert_device(DeviceInfo {
        device_serial: serial.to_string(),
        device_name: serial.to_string(),
        status: 1,
        is_support_ptz: true,
        camera_num: cameras,
        camera_info_list: (1..=cameras)
            .map(|no| CameraInfo {
                device_serial: serial.to_string(),
                camera_no: no,
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    });
}
