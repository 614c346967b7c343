//! Player Commands - 播放器通道命令参数

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::domain::PlayTarget;

use super::arguments::{Arguments, FromArguments};

/// 回放时间字符串格式
pub const REPLAY_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// initPlayerByDevice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitByDeviceArgs {
    pub device_serial: String,
    /// 默认 0
    pub camera_no: i32,
}

impl FromArguments for InitByDeviceArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            device_serial: args.str_or("deviceSerial", ""),
            camera_no: args.i32_or("cameraNo", 0),
        }
    }
}

impl From<InitByDeviceArgs> for PlayTarget {
    fn from(args: InitByDeviceArgs) -> Self {
        PlayTarget::device(args.device_serial, args.camera_no)
    }
}

/// initPlayerUrl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitByUrlArgs {
    pub url: String,
}

impl FromArguments for InitByUrlArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            url: args.str_or("url", ""),
        }
    }
}

impl From<InitByUrlArgs> for PlayTarget {
    fn from(args: InitByUrlArgs) -> Self {
        PlayTarget::url(args.url)
    }
}

/// initPlayerByUser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitByUserArgs {
    pub user_id: i64,
    pub camera_no: i32,
    /// 默认 1（主码流）
    pub stream_type: i32,
}

impl FromArguments for InitByUserArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            user_id: args.i64_or("userId", 0),
            camera_no: args.i32_or("cameraNo", 0),
            stream_type: args.i32_or("streamType", 1),
        }
    }
}

impl From<InitByUserArgs> for PlayTarget {
    fn from(args: InitByUserArgs) -> Self {
        PlayTarget::LocalUser {
            user_id: args.user_id,
            camera_no: args.camera_no,
            stream_type: args.stream_type,
        }
    }
}

/// startReplay
///
/// 时间既可以是本地时间 `yyyyMMddHHmmss` 字符串，也可以是 epoch 毫秒；
/// 无法解析时取当前时间。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayRangeArgs {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FromArguments for ReplayRangeArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            start: parse_replay_time(args.raw("startTime")),
            end: parse_replay_time(args.raw("endTime")),
        }
    }
}

fn parse_replay_time(value: Option<&Value>) -> DateTime<Utc> {
    let parsed = match value {
        Some(Value::String(s)) => NaiveDateTime::parse_from_str(s, REPLAY_TIME_FORMAT)
            .ok()
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .map(|local| local.with_timezone(&Utc)),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        tracing::debug!(value = ?value, "Unparsable replay time, using now");
        Utc::now()
    })
}

/// seekPlayback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekArgs {
    pub time_ms: i64,
}

impl FromArguments for SeekArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            time_ms: args.i64_or("timeMs", 0),
        }
    }
}

/// setPlayVerifyCode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCodeArgs {
    pub verify_code: String,
}

impl FromArguments for VerifyCodeArgs {
    fn from_arguments(args: &Arguments) -> Self {
        Self {
            verify_code: args.str_or("verifyCode", ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_init_by_user_defaults() {
        let parsed = InitByUserArgs::from_arguments(&Arguments::from_value(json!({ "userId": 9 })));
        assert_eq!(parsed.user_id, 9);
        assert_eq!(parsed.camera_no, 0);
        assert_eq!(parsed.stream_type, 1);
    }

    #[test]
    fn test_init_by_device_into_target() {
        let parsed = InitByDeviceArgs::from_arguments(&Arguments::from_value(json!({
            "deviceSerial": "A1",
        })));
        let target: PlayTarget = parsed.into();
        assert_eq!(target.device_channel(), Some(("A1", 0)));
    }

    #[test]
    fn test_replay_range_from_strings() {
        let parsed = ReplayRangeArgs::from_arguments(&Arguments::from_value(json!({
            "startTime": "20240102030405",
            "endTime": "20240102040405",
        })));

        let expected = Local
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .earliest()
            .map(|t| t.with_timezone(&Utc));
        assert_eq!(Some(parsed.start), expected);
        assert_eq!((parsed.end - parsed.start).num_seconds(), 3600);
    }

    #[test]
    fn test_replay_range_from_epoch_millis() {
        let parsed = ReplayRangeArgs::from_arguments(&Arguments::from_value(json!({
            "startTime": 1_700_000_000_000_i64,
            "endTime": 1_700_000_600_000_i64,
        })));
        assert_eq!(parsed.start.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(parsed.end.timestamp_millis(), 1_700_000_600_000);
    }

    #[test]
    fn test_unparsable_replay_time_is_now() {
        let before = Utc::now();
        let parsed = ReplayRangeArgs::from_arguments(&Arguments::from_value(json!({
            "startTime": "yesterday",
        })));
        assert!(parsed.start >= before);
        assert!(parsed.end >= before);
    }
}
