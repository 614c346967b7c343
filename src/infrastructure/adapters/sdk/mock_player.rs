//! Mock Player Handle

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::application::ports::{PlayerCallback, PlayerCallbackSender, PlayerHandle, SdkError};
use crate::domain::{PlayTarget, RecordFile};

use super::mock_sdk::MockState;

/// 模拟播放句柄
pub struct MockPlayerHandle {
    id: String,
    target: PlayTarget,
    state: Arc<MockState>,
    callbacks: PlayerCallbackSender,
    released: AtomicBool,
    verify_code: Mutex<Option<String>>,
    /// 回放位置，0 表示没有回放
    osd_time: AtomicI64,
}

impl MockPlayerHandle {
    pub(super) fn new(target: PlayTarget, state: Arc<MockState>, callbacks: PlayerCallbackSender) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        state.callbacks.insert(id.clone(), callbacks.clone());
        Self {
            id,
            target,
            state,
            callbacks,
            released: AtomicBool::new(false),
            verify_code: Mutex::new(None),
            osd_time: AtomicI64::new(0),
        }
    }

    fn check(&self, op: &'static str) -> Result<(), SdkError> {
        self.state.record(op, Some(&self.id));
        if self.released.load(Ordering::SeqCst) {
            return Err(SdkError::Released);
        }
        match self.state.take_failure(op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn enter(&self, op: &'static str) -> Result<(), SdkError> {
        self.state.delay().await;
        self.check(op)
    }

    /// 加密设备验证码不对时，SDK 通过回调报错而不是返回失败
    fn verify_or_report(&self) -> bool {
        let code = self
            .verify_code
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if self.state.needs_verify_code(&self.target, code.as_deref()) {
            let _ = self.callbacks.send(PlayerCallback::PasswordError(
                "Invalid verification code".to_string(),
            ));
            return false;
        }
        true
    }
}

#[async_trait]
impl PlayerHandle for MockPlayerHandle {
    fn id(&self) -> &str {
        &self.id
    }

    async fn start_real_play(&self) -> Result<bool, SdkError> {
        self.enter("start_real_play").await?;
        self.verify_or_report();
        Ok(true)
    }

    async fn stop_real_play(&self) -> Result<bool, SdkError> {
        self.enter("stop_real_play").await?;
        Ok(true)
    }

    async fn start_playback(&self, file: &RecordFile) -> Result<bool, SdkError> {
        self.enter("start_playback").await?;
        if !self.verify_or_report() {
            return Ok(true);
        }
        self.osd_time.store(file.start_time, Ordering::SeqCst);
        Ok(true)
    }

    async fn stop_playback(&self) -> Result<bool, SdkError> {
        self.enter("stop_playback").await?;
        self.osd_time.store(0, Ordering::SeqCst);
        Ok(true)
    }

    async fn pause_playback(&self) -> Result<bool, SdkError> {
        self.enter("pause_playback").await?;
        Ok(self.osd_time.load(Ordering::SeqCst) > 0)
    }

    async fn resume_playback(&self) -> Result<bool, SdkError> {
        self.enter("resume_playback").await?;
        Ok(self.osd_time.load(Ordering::SeqCst) > 0)
    }

    async fn seek_playback(&self, time_ms: i64) -> Result<bool, SdkError> {
        self.enter("seek_playback").await?;
        if time_ms <= 0 {
            return Ok(false);
        }
        self.osd_time.store(time_ms, Ordering::SeqCst);
        Ok(true)
    }

    fn osd_time(&self) -> Option<i64> {
        if self.released.load(Ordering::SeqCst) {
            return None;
        }
        Some(self.osd_time.load(Ordering::SeqCst)).filter(|ms| *ms > 0)
    }

    fn set_verify_code(&self, verify_code: &str) -> Result<(), SdkError> {
        self.check("set_verify_code")?;
        *self
            .verify_code
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(verify_code.to_string());
        Ok(())
    }

    fn open_sound(&self) -> Result<bool, SdkError> {
        self.check("open_sound")?;
        Ok(true)
    }

    fn close_sound(&self) -> Result<bool, SdkError> {
        self.check("close_sound")?;
        Ok(true)
    }

    async fn start_voice_talk(&self) -> Result<bool, SdkError> {
        self.enter("start_voice_talk").await?;
        if self.target.device_channel().is_none() {
            return Ok(false);
        }
        Ok(self.verify_or_report())
    }

    async fn stop_voice_talk(&self) -> Result<bool, SdkError> {
        self.enter("stop_voice_talk").await?;
        Ok(true)
    }

    async fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        self.state.record("release_player", Some(&self.id));
        self.state.callbacks.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CameraSdkPort, SdkInitOptions};
    use crate::domain::DeviceInfo;
    use crate::infrastructure::adapters::sdk::MockCameraSdk;
    use tokio::sync::mpsc;

    async fn ready_sdk() -> MockCameraSdk {
        let sdk = MockCameraSdk::default();
        sdk.init(SdkInitOptions {
            app_key: "key".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
        sdk.insert_device(DeviceInfo {
            device_serial: "A1".to_string(),
            is_encrypt: true,
            ..Default::default()
        });
        sdk.set_device_verify_code("A1", "CODE");
        sdk
    }

    #[tokio::test]
    async fn test_encrypted_device_reports_password_error() {
        let sdk = ready_sdk().await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = sdk
            .create_player(&PlayTarget::device("A1", 1), tx)
            .await
            .unwrap();

        assert!(handle.start_real_play().await.unwrap());
        assert!(matches!(rx.recv().await, Some(PlayerCallback::PasswordError(_))));

        handle.set_verify_code("CODE").unwrap();
        assert!(handle.start_real_play().await.unwrap());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_released_handle_rejects_calls() {
        let sdk = ready_sdk().await;
        let (tx, _rx) = mpsc::unbounded_channel();
        let handle = sdk
            .create_player(&PlayTarget::url("rtsp://cam/live"), tx)
            .await
            .unwrap();
        assert_eq!(sdk.live_handle_count(), 1);

        handle.release().await;
        handle.release().await;

        assert_eq!(sdk.live_handle_count(), 0);
        assert!(matches!(handle.start_real_play().await, Err(SdkError::Released)));
        assert_eq!(sdk.ops().iter().filter(|op| **op == "release_player").count(), 1);
    }

    #[tokio::test]
    async fn test_playback_updates_osd_time() {
        let sdk = ready_sdk().await;
        let (tx, _rx) = mpsc::unbounded_channel();
        let handle = sdk
            .create_player(&PlayTarget::url("rtsp://cam/live"), tx)
            .await
            .unwrap();
        assert_eq!(handle.osd_time(), None);

        let file = RecordFile {
            start_time: 1_000,
            end_time: 2_000,
            ..Default::default()
        };
        handle.start_playback(&file).await.unwrap();
        assert_eq!(handle.osd_time(), Some(1_000));
        handle.seek_playback(1_500).await.unwrap();
        assert_eq!(handle.osd_time(), Some(1_500));
    }
}
