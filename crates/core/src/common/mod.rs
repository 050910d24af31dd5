pub mod date;

pub use date::DateKey;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 图表查询周期枚举，定义一次请求回溯的日 K 线跨度。
///
/// # Invariants
/// - 线上文本形式固定为 `1M` / `3M` / `6M` / `1Y`。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum ChartPeriod {
    // 1个月
    OneMonth,
    // 3个月
    ThreeMonths,
    // 6个月
    #[default]
    SixMonths,
    // 1年
    OneYear,
}

impl ChartPeriod {
    /// 全部可选周期，按跨度升序排列。
    pub const ALL: [ChartPeriod; 4] = [
        ChartPeriod::OneMonth,
        ChartPeriod::ThreeMonths,
        ChartPeriod::SixMonths,
        ChartPeriod::OneYear,
    ];
}

impl FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1M" => Ok(ChartPeriod::OneMonth),
            "3M" => Ok(ChartPeriod::ThreeMonths),
            "6M" => Ok(ChartPeriod::SixMonths),
            "1Y" | "12M" => Ok(ChartPeriod::OneYear),
            _ => Err(format!("Unknown ChartPeriod: {}", s)),
        }
    }
}

impl TryFrom<String> for ChartPeriod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChartPeriod> for String {
    fn from(value: ChartPeriod) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartPeriod::OneMonth => write!(f, "1M"),
            ChartPeriod::ThreeMonths => write!(f, "3M"),
            ChartPeriod::SixMonths => write!(f, "6M"),
            ChartPeriod::OneYear => write!(f, "1Y"),
        }
    }
}

/// # Summary
/// 将序号转换为浮点坐标。
///
/// # Logic
/// 图表槽位数量远小于 2^52，转换不会丢失精度。
pub fn index_as_f64(index: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let value = index as f64;
    value
}

/// 成交量转浮点，仅用于像素映射。
pub fn volume_as_f64(volume: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let value = volume as f64;
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_round_trip_text() {
        for period in ChartPeriod::ALL {
            let text = period.to_string();
            assert_eq!(text.parse::<ChartPeriod>().unwrap(), period);
        }
        assert_eq!("1y".parse::<ChartPeriod>().unwrap(), ChartPeriod::OneYear);
        assert!("2W".parse::<ChartPeriod>().is_err());
        assert_eq!(ChartPeriod::default(), ChartPeriod::SixMonths);
    }
}
