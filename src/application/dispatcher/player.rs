//! Player Dispatcher - 播放视图通道

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::commands::*;
use crate::application::error::ApplicationError;
use crate::application::player::{PlayerSession, PlayerView};
use crate::domain::PlayTarget;

use super::{to_json, CallHandler};

/// 播放视图通道分发器
///
/// 与全局通道共享 SDK 生命周期锁，每个命令在整个执行期间持有读锁。
pub struct PlayerDispatcher;

impl PlayerDispatcher {
    pub async fn dispatch(session: &Arc<PlayerSession>, call: MethodCall) -> CommandResult {
        let Some(method) = PlayerMethod::parse(&call.method) else {
            tracing::debug!(channel = %session.channel(), method = %call.method, "Unknown player method");
            return CommandResult::NotImplemented;
        };
        let args = Arguments::from_value(call.arguments);
        tracing::debug!(channel = %session.channel(), method = %method, "Dispatching player command");

        let outcome = {
            let initialized = session.lifecycle().read().await;
            if method.requires_init() && !*initialized {
                Err(ApplicationError::SdkNotInitialized)
            } else {
                Self::run(session, method, &args).await
            }
        };
        if let Err(e) = &outcome {
            tracing::warn!(
                channel = %session.channel(),
                method = %method,
                code = e.code(),
                error = %e,
                "Player command failed"
            );
        }
        CommandResult::from_outcome(outcome)
    }

    async fn run(
        session: &Arc<PlayerSession>,
        method: PlayerMethod,
        args: &Arguments,
    ) -> Result<Value, ApplicationError> {
        let ok = |b: bool| -> Result<Value, ApplicationError> { Ok(Value::Bool(b)) };
        match method {
            PlayerMethod::InitPlayerByDevice => {
                let target: PlayTarget = InitByDeviceArgs::from_arguments(args).into();
                ok(session.init_player(target).await?)
            }
            PlayerMethod::InitPlayerUrl => {
                let target: PlayTarget = InitByUrlArgs::from_arguments(args).into();
                ok(session.init_player(target).await?)
            }
            PlayerMethod::InitPlayerByUser => {
                let target: PlayTarget = InitByUserArgs::from_arguments(args).into();
                ok(session.init_player(target).await?)
            }

            PlayerMethod::StartRealPlay => ok(session.start_real_play().await?),
            PlayerMethod::StopRealPlay => ok(session.stop_real_play().await?),

            PlayerMethod::StartReplay => {
                let range = ReplayRangeArgs::from_arguments(args);
                ok(session.start_replay(range.start, range.end).await?)
            }
            PlayerMethod::StopReplay => ok(session.stop_replay().await?),
            PlayerMethod::PausePlayback => ok(session.pause_playback().await?),
            PlayerMethod::ResumePlayback => ok(session.resume_playback().await?),
            PlayerMethod::SeekPlayback => {
                let args = SeekArgs::from_arguments(args);
                ok(session.seek_playback(args.time_ms).await?)
            }
            PlayerMethod::OsdTime => to_json(session.osd_time().await),

            PlayerMethod::PlayerRelease => ok(session.release().await),
            PlayerMethod::SetPlayVerifyCode => {
                let args = VerifyCodeArgs::from_arguments(args);
                session.set_verify_code(&args.verify_code).await;
                Ok(Value::Null)
            }
            PlayerMethod::OpenSound => ok(session.open_sound().await?),
            PlayerMethod::CloseSound => ok(session.close_sound().await?),

            PlayerMethod::IsRecording | PlayerMethod::IsLocalRecording => ok(false),
            PlayerMethod::CapturePicture
            | PlayerMethod::StartRecording
            | PlayerMethod::StopRecording
            | PlayerMethod::SetPlaySpeed
            | PlayerMethod::StartLocalRecord
            | PlayerMethod::StopLocalRecord => Err(ApplicationError::unsupported(method.as_str())),
        }
    }
}

#[async_trait]
impl CallHandler for PlayerView {
    async fn handle(&self, call: MethodCall) -> CommandResult {
        PlayerDispatcher::dispatch(self.session(), call).await
    }
}
