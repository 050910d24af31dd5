use crate::market::error::ChartError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// # Summary
/// 日历日期键，按自然时间顺序（而非字符串字典序）比较。
///
/// # Invariants
/// - 仅保留日期部分，时间与时区信息在解析时丢弃。
/// - 序列化形式固定为 `YYYY-MM-DD`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// 由已知合法的日期构造键。
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 返回底层日期。
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for DateKey {
    type Err = ChartError;

    /// # Summary
    /// 解析上游下发的日期文本。
    ///
    /// # Logic
    /// 1. 优先按 `YYYY-MM-DD` 解析。
    /// 2. 其次按 RFC 3339 时间戳解析并取日期部分。
    /// 3. 最后按无时区的 `YYYY-MM-DDTHH:MM:SS[.fff]` 解析。
    ///
    /// # Returns
    /// 三种格式都不匹配时返回 `ChartError::InvalidDate`。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
            debug!("date {} parsed as RFC 3339, time part dropped", text);
            return Ok(Self(ts.date_naive()));
        }
        for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(ts) = NaiveDateTime::parse_from_str(text, pattern) {
                debug!("date {} parsed as naive timestamp, time part dropped", text);
                return Ok(Self(ts.date()));
            }
        }
        Err(ChartError::InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for DateKey {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_formats() {
        let plain: DateKey = "2024-01-02".parse().unwrap();
        let rfc: DateKey = "2024-01-02T09:00:00+09:00".parse().unwrap();
        let naive: DateKey = "2024-01-02T00:00:00".parse().unwrap();
        let frac: DateKey = "2024-01-02 15:30:00.250".parse().unwrap();
        assert_eq!(plain, rfc);
        assert_eq!(plain, naive);
        assert_eq!(plain, frac);
        assert_eq!(plain.to_string(), "2024-01-02");
    }

    #[test]
    fn test_order_is_chronological() {
        // 字典序下 "2024-9-30" 会排在 "2024-10-01" 之后，这里必须按日期比较
        let sep: DateKey = "2024-9-30".parse().unwrap();
        let oct: DateKey = "2024-10-01".parse().unwrap();
        assert!(sep < oct);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let err = "yesterday".parse::<DateKey>().unwrap_err();
        assert!(matches!(err, ChartError::InvalidDate(ref s) if s == "yesterday"));
        assert!("2024-02-30".parse::<DateKey>().is_err());
    }

    #[test]
    fn test_serde_uses_plain_text() {
        let key: DateKey = serde_json::from_str("\"2024-03-05\"").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-03-05\"");
        assert!(serde_json::from_str::<DateKey>("\"not-a-date\"").is_err());
    }
}
