use crate::projector::project;
use serde::Serialize;
use sigboard_core::common::ChartPeriod;
use sigboard_core::screening::entity::{BuySignal, MarketStats, SectorFilter, SortKey};
use tracing::{debug, warn};

/// # Summary
/// 看板状态迁移动作，封闭枚举。
///
/// # Invariants
/// - 携带 `generation` 的结果动作只有在代次等于当前代次时才生效。
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    // 发起新一轮加载，代次加一
    FetchStarted,
    // 加载成功，整体替换信号与统计
    SignalsLoaded {
        generation: u64,
        signals: Vec<BuySignal>,
        stats: Option<MarketStats>,
    },
    // 加载失败
    FetchFailed { generation: u64, message: String },
    SortChanged(SortKey),
    SectorChanged(SectorFilter),
    // 选中某只股票查看详情，`None` 表示返回列表
    StockSelected(Option<String>),
    PeriodChanged(ChartPeriod),
}

/// # Summary
/// 看板全局状态，初始为空。
///
/// # Invariants
/// - 只能通过 `reduce` 产生新状态。
/// - `signals` 在每次成功加载时整体替换，从不局部修改。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub signals: Vec<BuySignal>,
    pub market_stats: Option<MarketStats>,
    pub loading: bool,
    pub error: Option<String>,
    pub sort_key: SortKey,
    pub sector_filter: SectorFilter,
    pub selected_symbol: Option<String>,
    pub chart_period: ChartPeriod,
    // 最近一次发起的请求代次
    pub generation: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Summary
    /// 纯函数式状态迁移。
    ///
    /// # Logic
    /// 1. `FetchStarted` 递增代次并进入加载中，保留旧数据直到新结果到达。
    /// 2. 代次落后的结果直接丢弃，状态不变。
    /// 3. 成功结果整体替换数据并清除错误；失败结果保留旧数据并记录错误。
    /// 4. 排序、板块、选股、周期变化只改对应字段。
    pub fn reduce(self, action: DashboardAction) -> Self {
        match action {
            DashboardAction::FetchStarted => Self {
                loading: true,
                generation: self.generation.wrapping_add(1),
                ..self
            },
            DashboardAction::SignalsLoaded {
                generation,
                signals,
                stats,
            } => {
                if generation != self.generation {
                    debug!(
                        "discard stale signals of generation {} (current {})",
                        generation, self.generation
                    );
                    return self;
                }
                debug!("loaded {} signals at generation {}", signals.len(), generation);
                Self {
                    signals,
                    market_stats: stats,
                    loading: false,
                    error: None,
                    ..self
                }
            }
            DashboardAction::FetchFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    debug!(
                        "discard stale failure of generation {} (current {})",
                        generation, self.generation
                    );
                    return self;
                }
                warn!("dashboard fetch failed: {}", message);
                Self {
                    loading: false,
                    error: Some(message),
                    ..self
                }
            }
            DashboardAction::SortChanged(sort_key) => Self { sort_key, ..self },
            DashboardAction::SectorChanged(sector_filter) => Self {
                sector_filter,
                ..self
            },
            DashboardAction::StockSelected(selected_symbol) => Self {
                selected_symbol,
                ..self
            },
            DashboardAction::PeriodChanged(chart_period) => Self {
                chart_period,
                ..self
            },
        }
    }

    /// 当前过滤与排序条件下的可见信号。
    pub fn visible_signals(&self) -> Vec<&BuySignal> {
        project(&self.signals, &self.sector_filter, self.sort_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_empty() {
        let state = DashboardState::new();
        assert!(state.signals.is_empty());
        assert!(state.market_stats.is_none());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.sort_key, SortKey::SignalStrength);
        assert_eq!(state.sector_filter, SectorFilter::All);
        assert_eq!(state.chart_period, ChartPeriod::SixMonths);
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn test_fetch_started_bumps_generation() {
        let state = DashboardState::new()
            .reduce(DashboardAction::FetchStarted)
            .reduce(DashboardAction::FetchStarted);
        assert!(state.loading);
        assert_eq!(state.generation, 2);
    }

    #[test]
    fn test_selection_fields_change_independently() {
        let state = DashboardState::new()
            .reduce(DashboardAction::SortChanged(SortKey::MarketCap))
            .reduce(DashboardAction::StockSelected(Some("005930".to_string())))
            .reduce(DashboardAction::PeriodChanged(ChartPeriod::OneYear));
        assert_eq!(state.sort_key, SortKey::MarketCap);
        assert_eq!(state.selected_symbol.as_deref(), Some("005930"));
        assert_eq!(state.chart_period, ChartPeriod::OneYear);
        assert_eq!(state.sector_filter, SectorFilter::All);
        assert!(!state.loading);
    }
}
