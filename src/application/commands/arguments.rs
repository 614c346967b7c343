//! Arguments - 宽松参数解码
//!
//! 宿主传入的参数表是无类型的。缺失或类型不符的字段一律回落到默认值，
//! 不会导致调用失败；需要严格校验的字段由各命令自行处理。

use serde_json::{Map, Value};

/// 命令参数表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    /// 非对象参数视为空表
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            Value::Null => Self::default(),
            other => {
                tracing::debug!(arguments = %other, "Arguments are not a mapping, treating as empty");
                Self::default()
            }
        }
    }

    pub fn opt_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => {
                mistyped(key, other);
                None
            }
        }
    }

    pub fn str_or(&self, key: &str, default: &str) -> String {
        self.opt_str(key).unwrap_or_else(|| default.to_string())
    }

    /// 只接受 JSON 整数，浮点数或字符串视为类型不符
    pub fn opt_i64(&self, key: &str) -> Option<i64> {
        let value = self.0.get(key)?;
        match value.as_i64() {
            Some(v) => Some(v),
            None => {
                mistyped(key, value);
                None
            }
        }
    }

    pub fn i64_or(&self, key: &str, default: i64) -> i64 {
        self.opt_i64(key).unwrap_or(default)
    }

    pub fn i32_or(&self, key: &str, default: i32) -> i32 {
        self.opt_i64(key)
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(default)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                mistyped(key, other);
                default
            }
            None => default,
        }
    }

    /// 原始值
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Value> for Arguments {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn mistyped(key: &str, value: &Value) {
    if !value.is_null() {
        tracing::debug!(key = %key, value = %value, "Argument has unexpected type, using default");
    }
}

/// 从参数表构造命令参数结构
pub trait FromArguments: Sized {
    fn from_arguments(args: &Arguments) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_mistyped_fall_back() {
        let args = Arguments::from_value(json!({
            "name": 12,
            "count": "3",
            "ratio": 1.5,
            "flag": "yes",
        }));

        assert_eq!(args.str_or("name", ""), "");
        assert_eq!(args.i32_or("count", 7), 7);
        assert_eq!(args.i32_or("ratio", 0), 0);
        assert!(!args.bool_or("flag", false));
        assert_eq!(args.str_or("absent", "dflt"), "dflt");
    }

    #[test]
    fn test_well_typed_values() {
        let args = Arguments::from_value(json!({
            "serial": "A1",
            "camera": 2,
            "time": 1_700_000_000_000_i64,
            "on": true,
        }));

        assert_eq!(args.str_or("serial", ""), "A1");
        assert_eq!(args.i32_or("camera", 1), 2);
        assert_eq!(args.i64_or("time", 0), 1_700_000_000_000);
        assert!(args.bool_or("on", false));
    }

    #[test]
    fn test_out_of_range_int_falls_back() {
        let args = Arguments::from_value(json!({ "n": 1_i64 << 40 }));
        assert_eq!(args.i32_or("n", -1), -1);
        assert_eq!(args.i64_or("n", -1), 1_i64 << 40);
    }

    #[test]
    fn test_non_object_is_empty() {
        assert_eq!(Arguments::from_value(json!([1, 2])), Arguments::default());
        assert_eq!(Arguments::from_value(json!("x")), Arguments::default());
    }
}
