use crate::common::ChartPeriod;
use crate::market::entity::ChartPayload;
use crate::screening::entity::{BuySignal, MarketStats, StockInfo};
use crate::source::error::SourceError;
use crate::source::port::DashboardSource;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::RwLock;

/// # Summary
/// 纯内存数据源，供测试与演示注入预设数据。
///
/// # Invariants
/// - 股票详情以代码为键，图表以 `(symbol, period)` 为键存储。
/// - 未预置的数据返回 `SourceError::NotFound`。
#[derive(Default)]
pub struct MemorySource {
    signals: RwLock<Option<Vec<BuySignal>>>,
    stats: RwLock<Option<MarketStats>>,
    stocks: DashMap<String, StockInfo>,
    charts: DashMap<(String, ChartPeriod), ChartPayload>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换预置的信号列表。
    pub fn set_signals(&self, signals: Vec<BuySignal>) {
        let mut slot = self.signals.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(signals);
    }

    /// 替换预置的市场统计。
    pub fn set_market_stats(&self, stats: MarketStats) {
        let mut slot = self.stats.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(stats);
    }

    /// 预置一只股票的详情，键取自详情自身的代码。
    pub fn insert_stock_info(&self, info: StockInfo) {
        self.stocks.insert(info.symbol.clone(), info);
    }

    /// 预置一份图表载荷，键取自载荷自身的代码与周期。
    pub fn insert_chart(&self, payload: ChartPayload) {
        self.charts
            .insert((payload.symbol.clone(), payload.period), payload);
    }
}

#[async_trait]
impl DashboardSource for MemorySource {
    async fn fetch_signals(&self) -> Result<Vec<BuySignal>, SourceError> {
        let slot = self.signals.read().unwrap_or_else(|e| e.into_inner());
        slot.clone()
            .ok_or_else(|| SourceError::NotFound("signals".to_string()))
    }

    async fn fetch_market_stats(&self) -> Result<MarketStats, SourceError> {
        let slot = self.stats.read().unwrap_or_else(|e| e.into_inner());
        slot.clone()
            .ok_or_else(|| SourceError::NotFound("market stats".to_string()))
    }

    async fn fetch_stock_info(&self, symbol: &str) -> Result<StockInfo, SourceError> {
        self.stocks
            .get(symbol)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SourceError::NotFound(format!("stock {}", symbol)))
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        period: ChartPeriod,
    ) -> Result<ChartPayload, SourceError> {
        self.charts
            .get(&(symbol.to_string(), period))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SourceError::NotFound(format!("chart {} {}", symbol, period)))
    }
}
