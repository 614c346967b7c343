//! Player Session - 播放会话状态
//!
//! 一个会话持有至多一个 SDK 播放句柄。所有改变句柄的操作都在异步锁内串行执行；
//! 每次创建或释放句柄都会递增代数（generation），旧句柄的回调和尚未完成的
//! 录像检索在代数不匹配时直接丢弃，不会影响新的播放。
//!
//! 进入 Error 后只能通过重新 init（或 release 回到 Idle）恢复，期间的开始播放请求返回 false。

use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::application::error::{codes, ApplicationError};
use crate::application::lifecycle::SdkLifecycle;
use crate::application::ports::{CameraSdkPort, PlayerCallback, PlayerHandle, StatusEmitter};
use crate::domain::{PlayTarget, PlayerStatus, RecordSource, StatusEvent};

/// 录像为空
pub const NO_RECORDINGS: &str = "no recordings found";
/// 句柄拒绝回放
pub const PLAYBACK_REFUSED: &str = "can't start playback";
/// 未初始化就设置验证码
pub const NOT_READY_FOR_VERIFY_CODE: &str = "player not ready for verification code";

/// 当前句柄在做什么，释放时据此决定要停止哪种播放
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayMode {
    Idle,
    Live,
    Playback,
    Talk,
}

struct SessionState {
    status: PlayerStatus,
    generation: u64,
    /// 回放检索票据，stopReplay 或新的 startReplay 会使旧检索失效
    replay: u64,
}

/// 回调监听任务与会话共享的部分
struct SessionShared {
    channel: String,
    emitter: Arc<dyn StatusEmitter>,
    state: StdMutex<SessionState>,
}

impl SessionShared {
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump_generation(&self) -> u64 {
        let mut state = self.state();
        state.generation += 1;
        state.generation
    }

    fn is_errored(&self) -> bool {
        self.state().status == PlayerStatus::Error
    }

    /// 作废之前的回放检索，返回新票据
    fn next_replay(&self) -> u64 {
        let mut state = self.state();
        state.replay += 1;
        state.replay
    }

    fn is_current_replay(&self, generation: u64, replay: u64) -> bool {
        let state = self.state();
        state.generation == generation && state.replay == replay
    }

    /// 非法迁移直接丢弃，返回是否推送
    fn emit_locked(
        &self,
        state: &mut SessionState,
        status: PlayerStatus,
        message: Option<&str>,
    ) -> bool {
        if !state.status.can_transition_to(status) {
            tracing::debug!(
                channel = %self.channel,
                from = %state.status,
                to = %status,
                "Rejecting player status transition"
            );
            return false;
        }
        state.status = status;
        self.emitter
            .emit(&self.channel, StatusEvent::player_status(status, message));
        true
    }

    fn emit(&self, status: PlayerStatus, message: Option<&str>) -> bool {
        let mut state = self.state();
        self.emit_locked(&mut state, status, message)
    }

    /// 代数匹配时才推送，返回是否推送
    fn emit_if_current(&self, generation: u64, status: PlayerStatus, message: Option<&str>) -> bool {
        let mut state = self.state();
        if state.generation != generation {
            return false;
        }
        self.emit_locked(&mut state, status, message)
    }

    /// 回放检索仍然有效时才推送
    fn emit_for_replay(
        &self,
        generation: u64,
        replay: u64,
        status: PlayerStatus,
        message: Option<&str>,
    ) -> bool {
        let mut state = self.state();
        if state.generation != generation || state.replay != replay {
            return false;
        }
        self.emit_locked(&mut state, status, message)
    }
}

struct SessionInner {
    handle: Option<Box<dyn PlayerHandle>>,
    target: Option<PlayTarget>,
    mode: PlayMode,
    listener: Option<JoinHandle<()>>,
}

/// 播放会话
pub struct PlayerSession {
    sdk: Arc<dyn CameraSdkPort>,
    lifecycle: Arc<SdkLifecycle>,
    shared: Arc<SessionShared>,
    inner: Mutex<SessionInner>,
}

impl PlayerSession {
    /// 创建会话，状态事件发往 `channel`
    pub fn new(
        channel: impl Into<String>,
        sdk: Arc<dyn CameraSdkPort>,
        lifecycle: Arc<SdkLifecycle>,
        emitter: Arc<dyn StatusEmitter>,
    ) -> Self {
        Self {
            sdk,
            lifecycle,
            shared: Arc::new(SessionShared {
                channel: channel.into(),
                emitter,
                state: StdMutex::new(SessionState {
                    status: PlayerStatus::Idle,
                    generation: 0,
                    replay: 0,
                }),
            }),
            inner: Mutex::new(SessionInner {
                handle: None,
                target: None,
                mode: PlayMode::Idle,
                listener: None,
            }),
        }
    }

    pub fn channel(&self) -> &str {
        &self.shared.channel
    }

    pub fn status(&self) -> PlayerStatus {
        self.shared.state().status
    }

    /// 与全局通道共享的 SDK 生命周期锁
    pub fn lifecycle(&self) -> &Arc<SdkLifecycle> {
        &self.lifecycle
    }

    pub async fn has_handle(&self) -> bool {
        self.inner.lock().await.handle.is_some()
    }

    // ---------- 句柄生命周期 ----------

    async fn init_locked(
        &self,
        inner: &mut SessionInner,
        target: PlayTarget,
        code: &'static str,
    ) -> Result<(), ApplicationError> {
        self.release_locked(inner).await;

        let generation = self.shared.bump_generation();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = self
            .sdk
            .create_player(&target, tx)
            .await
            .map_err(ApplicationError::sdk_with(code))?;

        tracing::info!(
            channel = %self.shared.channel,
            handle_id = %handle.id(),
            target = %target,
            generation = generation,
            "Player handle created"
        );

        inner.listener = Some(tokio::spawn(forward_callbacks(
            Arc::clone(&self.shared),
            generation,
            rx,
        )));
        inner.handle = Some(handle);
        inner.target = Some(target);
        inner.mode = PlayMode::Idle;
        self.shared.emit_if_current(generation, PlayerStatus::Init, None);
        Ok(())
    }

    /// 停止正在进行的播放并释放句柄，返回之前是否持有句柄
    async fn release_locked(&self, inner: &mut SessionInner) -> bool {
        let Some(handle) = inner.handle.take() else {
            return false;
        };

        self.shared.bump_generation();
        if let Some(listener) = inner.listener.take() {
            listener.abort();
        }

        let mode = std::mem::replace(&mut inner.mode, PlayMode::Idle);
        let stopped = match mode {
            PlayMode::Idle => None,
            PlayMode::Live => Some(handle.stop_real_play().await),
            PlayMode::Playback => Some(handle.stop_playback().await),
            PlayMode::Talk => Some(handle.stop_voice_talk().await),
        };
        match stopped {
            Some(Ok(_)) => {
                self.shared.emit(PlayerStatus::Stop, None);
            }
            Some(Err(e)) => tracing::warn!(
                channel = %self.shared.channel,
                handle_id = %handle.id(),
                error = %e,
                "Failed to stop player before release"
            ),
            None => {}
        }

        handle.release().await;
        inner.target = None;
        self.shared.emit(PlayerStatus::Idle, None);

        tracing::info!(
            channel = %self.shared.channel,
            handle_id = %handle.id(),
            "Player handle released"
        );
        true
    }

    /// 绑定新目标，已有句柄会先被释放
    pub async fn init_player(&self, target: PlayTarget) -> Result<bool, ApplicationError> {
        let mut inner = self.inner.lock().await;
        self.init_locked(&mut inner, target, codes::PLAYER_ERROR).await?;
        Ok(true)
    }

    /// 释放句柄，可重复调用；没有句柄时不推送任何事件
    pub async fn release(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if !self.release_locked(&mut inner).await {
            tracing::debug!(channel = %self.shared.channel, "Release without handle");
        }
        true
    }

    // ---------- 直播 ----------

    pub async fn start_real_play(&self) -> Result<bool, ApplicationError> {
        let mut inner = self.inner.lock().await;
        let Some(handle) = inner.handle.as_ref() else {
            return Ok(false);
        };
        if self.shared.is_errored() {
            tracing::debug!(channel = %self.shared.channel, "Live play refused in error state");
            return Ok(false);
        }

        let started = handle
            .start_real_play()
            .await
            .map_err(ApplicationError::sdk_with(codes::PLAYER_ERROR))?;
        if started {
            inner.mode = PlayMode::Live;
            self.shared.emit(PlayerStatus::Start, None);
        }
        Ok(started)
    }

    pub async fn stop_real_play(&self) -> Result<bool, ApplicationError> {
        let mut inner = self.inner.lock().await;
        let Some(handle) = inner.handle.as_ref() else {
            return Ok(false);
        };

        let stopped = handle
            .stop_real_play()
            .await
            .map_err(ApplicationError::sdk_with(codes::PLAYER_ERROR))?;
        if stopped {
            inner.mode = PlayMode::Idle;
            self.shared.emit(PlayerStatus::Stop, None);
        }
        Ok(stopped)
    }

    // ---------- 回放 ----------

    /// 在设备上检索录像并回放第一段
    ///
    /// 检索在后台进行，返回值只表示是否已经开始检索；结果通过状态事件送达。
    pub async fn start_replay(
        self: &Arc<Self>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, ApplicationError> {
        let inner = self.inner.lock().await;
        if inner.handle.is_none() {
            return Ok(false);
        }
        let Some((serial, camera_no)) = inner.target.as_ref().and_then(|t| t.device_channel()) else {
            tracing::debug!(channel = %self.shared.channel, "Replay requires a device target");
            return Ok(false);
        };
        if self.shared.is_errored() {
            tracing::debug!(channel = %self.shared.channel, "Replay refused in error state");
            return Ok(false);
        }
        let serial = serial.to_string();
        let generation = self.shared.state().generation;
        let replay = self.shared.next_replay();
        drop(inner);

        let session = Arc::clone(self);
        tokio::spawn(async move {
            session
                .run_replay(generation, replay, serial, camera_no, start, end)
                .await;
        });
        Ok(true)
    }

    /// 检索与开始回放都在生命周期读锁内完成
    async fn run_replay(
        &self,
        generation: u64,
        replay: u64,
        serial: String,
        camera_no: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) {
        let initialized = self.lifecycle.read().await;
        if !*initialized {
            let message = format!("Failed to get recordings: {}", ApplicationError::SdkNotInitialized);
            self.shared
                .emit_for_replay(generation, replay, PlayerStatus::Error, Some(&message));
            return;
        }

        let files = match self
            .sdk
            .search_records(RecordSource::Device, &serial, camera_no, start, end)
            .await
        {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(device_serial = %serial, error = %e, "Record lookup failed");
                let message = format!("Failed to get recordings: {}", e);
                self.shared
                    .emit_for_replay(generation, replay, PlayerStatus::Error, Some(&message));
                return;
            }
        };

        let mut inner = self.inner.lock().await;
        if !self.shared.is_current_replay(generation, replay) {
            tracing::debug!(device_serial = %serial, "Replay cancelled during record lookup, dropping result");
            return;
        }
        let Some(first) = files.first() else {
            self.shared
                .emit_for_replay(generation, replay, PlayerStatus::Error, Some(NO_RECORDINGS));
            return;
        };
        if self.shared.is_errored() {
            tracing::debug!(device_serial = %serial, "Player entered error state during record lookup");
            return;
        }
        let Some(handle) = inner.handle.as_ref() else {
            return;
        };

        let started = handle.start_playback(first).await;
        match started {
            Ok(true) => {
                inner.mode = PlayMode::Playback;
                self.shared
                    .emit_for_replay(generation, replay, PlayerStatus::Start, None);
                tracing::info!(
                    device_serial = %serial,
                    file_name = %first.file_name,
                    found = files.len(),
                    "Playback started"
                );
            }
            Ok(false) => {
                self.shared
                    .emit_for_replay(generation, replay, PlayerStatus::Error, Some(PLAYBACK_REFUSED));
            }
            Err(e) => {
                tracing::warn!(device_serial = %serial, error = %e, "Playback start failed");
                self.shared
                    .emit_for_replay(generation, replay, PlayerStatus::Error, Some(PLAYBACK_REFUSED));
            }
        }
    }

    pub async fn stop_replay(&self) -> Result<bool, ApplicationError> {
        let mut inner = self.inner.lock().await;
        self.shared.next_replay();
        let Some(handle) = inner.handle.as_ref() else {
            return Ok(false);
        };

        let stopped = handle
            .stop_playback()
            .await
            .map_err(ApplicationError::sdk_with(codes::PLAYER_ERROR))?;
        if stopped {
            inner.mode = PlayMode::Idle;
            self.shared.emit(PlayerStatus::Stop, None);
        }
        Ok(stopped)
    }

    pub async fn pause_playback(&self) -> Result<bool, ApplicationError> {
        let inner = self.inner.lock().await;
        let Some(handle) = inner.handle.as_ref().filter(|_| inner.mode == PlayMode::Playback) else {
            return Ok(false);
        };
        if self.shared.is_errored() {
            return Ok(false);
        }

        let paused = handle
            .pause_playback()
            .await
            .map_err(ApplicationError::sdk_with(codes::PLAYER_ERROR))?;
        if paused {
            self.shared.emit(PlayerStatus::Pause, None);
        }
        Ok(paused)
    }

    pub async fn resume_playback(&self) -> Result<bool, ApplicationError> {
        let inner = self.inner.lock().await;
        let Some(handle) = inner.handle.as_ref().filter(|_| inner.mode == PlayMode::Playback) else {
            return Ok(false);
        };
        if self.shared.is_errored() {
            tracing::debug!(channel = %self.shared.channel, "Resume refused in error state");
            return Ok(false);
        }

        let resumed = handle
            .resume_playback()
            .await
            .map_err(ApplicationError::sdk_with(codes::PLAYER_ERROR))?;
        if resumed {
            self.shared.emit(PlayerStatus::Start, None);
        }
        Ok(resumed)
    }

    pub async fn seek_playback(&self, time_ms: i64) -> Result<bool, ApplicationError> {
        let inner = self.inner.lock().await;
        match inner.handle.as_ref() {
            Some(handle) => handle
                .seek_playback(time_ms)
                .await
                .map_err(ApplicationError::sdk_with(codes::PLAYER_ERROR)),
            None => Ok(false),
        }
    }

    /// 当前回放位置（epoch 毫秒）
    pub async fn osd_time(&self) -> Option<i64> {
        self.inner
            .lock()
            .await
            .handle
            .as_ref()
            .and_then(|handle| handle.osd_time())
    }

    // ---------- 其它 ----------

    /// 设置设备验证码，失败只通过状态事件报告
    pub async fn set_verify_code(&self, verify_code: &str) {
        let inner = self.inner.lock().await;
        let Some(handle) = inner.handle.as_ref() else {
            tracing::warn!(channel = %self.shared.channel, "Verify code set before player init");
            self.shared
                .emit(PlayerStatus::Error, Some(NOT_READY_FOR_VERIFY_CODE));
            return;
        };

        if let Err(e) = handle.set_verify_code(verify_code) {
            let message = format!("Failed to set verification code: {}", e);
            self.shared.emit(PlayerStatus::Error, Some(&message));
        }
    }

    pub async fn open_sound(&self) -> Result<bool, ApplicationError> {
        let inner = self.inner.lock().await;
        match inner.handle.as_ref() {
            Some(handle) => handle
                .open_sound()
                .map_err(ApplicationError::sdk_with(codes::PLAYER_ERROR)),
            None => Ok(false),
        }
    }

    pub async fn close_sound(&self) -> Result<bool, ApplicationError> {
        let inner = self.inner.lock().await;
        match inner.handle.as_ref() {
            Some(handle) => handle
                .close_sound()
                .map_err(ApplicationError::sdk_with(codes::PLAYER_ERROR)),
            None => Ok(false),
        }
    }

    // ---------- 对讲 ----------

    /// 切换对讲设备：停止并释放旧句柄，为新设备创建句柄后开始对讲
    pub async fn restart_voice_talk(
        &self,
        target: PlayTarget,
        verify_code: Option<&str>,
    ) -> Result<bool, ApplicationError> {
        let mut inner = self.inner.lock().await;
        self.init_locked(&mut inner, target, codes::VOICE_TALK_ERROR)
            .await?;
        let Some(handle) = inner.handle.as_ref() else {
            return Ok(false);
        };

        if let Some(code) = verify_code {
            handle
                .set_verify_code(code)
                .map_err(ApplicationError::sdk_with(codes::VOICE_TALK_ERROR))?;
        }
        let started = handle
            .start_voice_talk()
            .await
            .map_err(ApplicationError::sdk_with(codes::VOICE_TALK_ERROR))?;
        if started {
            inner.mode = PlayMode::Talk;
            self.shared.emit(PlayerStatus::Start, None);
        }
        Ok(started)
    }

    /// 结束对讲并释放句柄；没有对讲句柄时视为成功
    pub async fn stop_voice_talk(&self) -> Result<bool, ApplicationError> {
        let mut inner = self.inner.lock().await;
        let Some(handle) = inner.handle.as_ref() else {
            return Ok(true);
        };

        let stopped = handle.stop_voice_talk().await;
        if matches!(stopped, Ok(true)) {
            self.shared.emit(PlayerStatus::Stop, None);
        }
        inner.mode = PlayMode::Idle;
        self.release_locked(&mut inner).await;
        stopped.map_err(ApplicationError::sdk_with(codes::VOICE_TALK_ERROR))
    }
}

/// 把 SDK 回调映射为状态变化，忽略的回调返回 None
pub fn map_callback(callback: &PlayerCallback) -> Option<(PlayerStatus, Option<String>)> {
    match callback {
        PlayerCallback::PlayStart => Some((PlayerStatus::Start, None)),
        PlayerCallback::StopSuccess => Some((PlayerStatus::Stop, None)),
        PlayerCallback::PasswordError(desc) => Some((
            PlayerStatus::Error,
            Some(format!("Verification code error: {}", desc)),
        )),
        PlayerCallback::PlayFailed(desc) => Some((PlayerStatus::Error, Some(desc.clone()))),
        PlayerCallback::Message(code) if *code < 0 => Some((
            PlayerStatus::Error,
            Some(format!("Unknown error: {}", code)),
        )),
        PlayerCallback::Message(_) | PlayerCallback::DisplaySize { .. } => None,
    }
}

async fn forward_callbacks(
    shared: Arc<SessionShared>,
    generation: u64,
    mut rx: mpsc::UnboundedReceiver<PlayerCallback>,
) {
    while let Some(callback) = rx.recv().await {
        let Some((status, message)) = map_callback(&callback) else {
            tracing::trace!(channel = %shared.channel, callback = ?callback, "Ignoring player callback");
            continue;
        };
        let mut state = shared.state();
        if state.generation != generation {
            tracing::debug!(
                channel = %shared.channel,
                callback = ?callback,
                "Dropping callback from stale player"
            );
            return;
        }
        shared.emit_locked(&mut state, status, message.as_deref());
    }
}
