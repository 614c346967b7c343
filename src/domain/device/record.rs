//! Device Context - 录像文件

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 录像来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// 云存储
    Cloud,
    /// 设备本地存储（SD 卡 / NVR）
    Device,
}

/// 录像文件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordFile {
    pub file_name: String,
    /// 开始时间（epoch 毫秒）
    pub start_time: i64,
    /// 结束时间（epoch 毫秒）
    pub end_time: i64,
    pub file_size: i64,
    pub rec_type: i32,
}

impl RecordFile {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, file_size: i64) -> Self {
        Self {
            file_name: start.format("%Y%m%d%H%M%S").to_string(),
            start_time: start.timestamp_millis(),
            end_time: end.timestamp_millis(),
            file_size,
            rec_type: 0,
        }
    }

    /// 与 [start, end] 区间是否有交集
    pub fn overlaps(&self, start_ms: i64, end_ms: i64) -> bool {
        self.start_time <= end_ms && self.end_time >= start_ms
    }

    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).max(0)
    }
}
