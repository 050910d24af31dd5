use crate::common::DateKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// # Summary
/// 买入信号记录，由服务端筛选任务生成。
///
/// # Invariants
/// - `signal_strength` 取值范围 0–100。
/// - 列表整体替换，单条记录永不原地修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuySignal {
    // 股票代码
    pub symbol: String,
    // 股票名称
    pub name: String,
    // 所属板块
    pub sector: String,
    // 现价
    pub price: f64,
    // 涨跌额
    pub change: f64,
    // 涨跌幅 (%)
    pub change_percent: f64,
    // 市值
    pub market_cap: f64,
    // 综合信号强度
    pub signal_strength: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    // 信号触发原因说明
    pub reason: String,
    // 信号日期
    pub date: String,
}

/// # Summary
/// 单只股票详情，用于详情页抬头与指标摘要。
///
/// # Invariants
/// - `current_*` 为服务端最新一期指标，可能缺失。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    pub symbol: String,
    pub name: String,
    // 现价
    pub price: f64,
    // 涨跌额
    pub change: f64,
    // 涨跌幅 (%)
    pub change_percent: f64,
    // 成交量
    pub volume: u64,
    // 市值
    pub market_cap: f64,
    pub sector: String,
    // 细分行业
    #[serde(default)]
    pub industry: Option<String>,
    // 上市日期
    #[serde(default)]
    pub listing_date: Option<DateKey>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub current_rsi: Option<f64>,
    #[serde(default)]
    pub current_macd: Option<f64>,
    #[serde(default)]
    pub current_macd_signal: Option<f64>,
}

/// # Summary
/// 市场概览统计，核心层只透传不加工。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    pub kospi_index: f64,
    pub kospi_change: f64,
    pub kosdaq_index: f64,
    pub kosdaq_change: f64,
    pub signal_count: u64,
    #[serde(default)]
    pub strong_signal_count: Option<u64>,
    #[serde(default)]
    pub top_sectors: Vec<String>,
    #[serde(default)]
    pub sector_distribution: BTreeMap<String, u64>,
}

/// # Summary
/// 信号列表的排序键，封闭枚举。
///
/// # Invariants
/// - 所有排序均为降序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    // 按信号强度
    #[default]
    SignalStrength,
    // 按涨跌幅
    ChangePercent,
    // 按市值
    MarketCap,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::SignalStrength, SortKey::ChangePercent, SortKey::MarketCap];

    /// 取出信号上对应的排序字段。
    pub fn value_of(self, signal: &BuySignal) -> f64 {
        match self {
            SortKey::SignalStrength => signal.signal_strength,
            SortKey::ChangePercent => signal.change_percent,
            SortKey::MarketCap => signal.market_cap,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "signal_strength" | "signalStrength" => Ok(SortKey::SignalStrength),
            "change_percent" | "changePercent" => Ok(SortKey::ChangePercent),
            "market_cap" | "marketCap" => Ok(SortKey::MarketCap),
            _ => Err(format!("Unknown SortKey: {}", s)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::SignalStrength => write!(f, "signal_strength"),
            SortKey::ChangePercent => write!(f, "change_percent"),
            SortKey::MarketCap => write!(f, "market_cap"),
        }
    }
}

/// # Summary
/// 板块过滤条件。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorFilter {
    // 不过滤
    #[default]
    All,
    // 仅保留指定板块（精确匹配）
    Sector(String),
}

impl SectorFilter {
    /// 判断板块是否通过过滤。
    pub fn matches(&self, sector: &str) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Sector(wanted) => wanted == sector,
        }
    }
}

impl From<Option<String>> for SectorFilter {
    /// 空字符串与 `None` 均视为不过滤，与下拉框的“全部”选项一致。
    fn from(value: Option<String>) -> Self {
        match value {
            Some(sector) if !sector.is_empty() => SectorFilter::Sector(sector),
            _ => SectorFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("signal_strength".parse::<SortKey>().unwrap(), SortKey::SignalStrength);
        assert_eq!("changePercent".parse::<SortKey>().unwrap(), SortKey::ChangePercent);
        assert_eq!("market_cap".parse::<SortKey>().unwrap(), SortKey::MarketCap);
        assert!("volume".parse::<SortKey>().is_err());
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_sector_filter_from_selection() {
        assert_eq!(SectorFilter::from(None), SectorFilter::All);
        assert_eq!(SectorFilter::from(Some(String::new())), SectorFilter::All);
        let filter = SectorFilter::from(Some("반도체".to_string()));
        assert!(filter.matches("반도체"));
        assert!(!filter.matches("은행"));
        assert!(SectorFilter::All.matches("은행"));
    }

    #[test]
    fn test_stock_info_optional_fields() {
        let json = r#"{"symbol":"005930","name":"삼성전자","price":75000,"change":-500,
            "change_percent":-0.66,"volume":15000000,"market_cap":4.5e14,"sector":"반도체",
            "listing_date":"1975-06-11","current_rsi":28.1,"current_macd":null}"#;
        let info: StockInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.volume, 15_000_000);
        assert_eq!(info.listing_date.map(|d| d.to_string()).as_deref(), Some("1975-06-11"));
        assert_eq!(info.current_rsi, Some(28.1));
        assert!(info.current_macd.is_none());
        assert!(info.current_macd_signal.is_none());
        assert!(info.industry.is_none());

        let bad = r#"{"symbol":"005930","name":"x","price":1,"change":0,"change_percent":0,
            "volume":1,"market_cap":1,"sector":"IT","listing_date":"someday"}"#;
        assert!(serde_json::from_str::<StockInfo>(bad).is_err());
    }

    #[test]
    fn test_market_stats_optional_fields() {
        let json = r#"{"kospi_index":2650.1,"kospi_change":-3.2,"kosdaq_index":870.5,
            "kosdaq_change":1.1,"signal_count":12,"top_sectors":["IT"]}"#;
        let stats: MarketStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.signal_count, 12);
        assert!(stats.strong_signal_count.is_none());
        assert!(stats.sector_distribution.is_empty());
    }
}
