//! 时间类型模块
//!
//! 后端返回的时间字段格式并不统一：
//! - RFC 3339（带时区）
//! - RFC 2822 / HTTP 日期，例如 `Wed, 01 May 2024 08:30:00 GMT`
//! - 不带时区的 ISO 8601（按 UTC 处理）
//! - 纯日期 `YYYY-MM-DD`
//! - 毫秒时间戳
//!
//! `Timestamp` 统一接收以上格式，序列化时固定输出毫秒精度的 UTC RFC 3339。
//! 展示用的标签按浏览器本地时区格式化。

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

/// 可序列化的 UTC 时间点
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[inline]
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    #[inline]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// 从毫秒时间戳创建，超出范围时返回 None
    pub fn from_millis(ms: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(ms).map(Self)
    }

    /// 解析后端可能返回的任意时间格式
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Ok(at) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(at.with_timezone(&Utc)));
        }

        if let Ok(at) = DateTime::parse_from_rfc2822(s) {
            return Some(Self(at.with_timezone(&Utc)));
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self(naive.and_utc()));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    #[inline]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// 传输格式，例如 `2024-05-01T00:00:00.000Z`
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// 本地日期，例如 `5/1/2024`
    pub fn date_label(&self) -> String {
        self.date_label_in(&Local)
    }

    /// 本地日期时间，例如 `5/1/2024, 3:04 PM`
    pub fn datetime_label(&self) -> String {
        self.datetime_label_in(&Local)
    }

    pub fn date_label_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.0.with_timezone(tz).format("%-m/%-d/%Y").to_string()
    }

    pub fn datetime_label_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.0
            .with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M %p")
            .to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Text(s) => Timestamp::parse(&s)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {s}"))),
            RawTimestamp::Millis(ms) => Timestamp::from_millis(ms)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
        }
    }
}

/// 仅用于展示的时间字段
///
/// 无法解析的值记录警告后视为缺失，不让整条记录（乃至整个列表）解码失败。
pub fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Timestamp>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Millis(i64),
        Other(de::IgnoredAny),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => {
            let parsed = Timestamp::parse(&s);
            if parsed.is_none() {
                log::warn!("ignoring unparseable timestamp {s:?}");
            }
            parsed
        }
        Loose::Millis(ms) => Timestamp::from_millis(ms),
        Loose::Other(_) => None,
    })
}
