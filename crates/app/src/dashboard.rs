use crate::settings::Settings;
use serde::Serialize;
use sigboard_chart::indicator::SignalTier;
use sigboard_chart::pipeline::{ChartView, build_chart};
use sigboard_core::common::ChartPeriod;
use sigboard_core::screening::entity::{BuySignal, MarketStats, SectorFilter, SortKey, StockInfo};
use sigboard_core::source::port::DashboardSource;
use sigboard_screen::projector::sectors;
use sigboard_screen::store::{DashboardAction, DashboardState};
use tracing::{info, warn};

/// 列表中的一行：信号本身加强度分档。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRow {
    #[serde(flatten)]
    pub signal: BuySignal,
    pub tier: SignalTier,
}

/// # Summary
/// 一次看板刷新的完整输出。
///
/// # Invariants
/// - `signals` 已按当前排序键降序并经过板块过滤。
/// - `chart` 与 `chart_error` 至多一个为 `Some`，`stock` 与 `stock_error` 同理。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub market_stats: Option<MarketStats>,
    pub error: Option<String>,
    pub sort_key: SortKey,
    pub sector_filter: SectorFilter,
    pub sectors: Vec<String>,
    pub signals: Vec<SignalRow>,
    pub selected_symbol: Option<String>,
    pub period: ChartPeriod,
    pub stock: Option<StockInfo>,
    pub stock_error: Option<String>,
    pub chart: Option<ChartView>,
    pub chart_error: Option<String>,
}

/// # Summary
/// 执行一次完整的看板刷新。
///
/// # Logic
/// 1. 将视图选择写入状态容器并发起新一代请求。
/// 2. 并发获取信号与市场统计；信号失败进入错误状态，统计失败只记录告警。
/// 3. 选定详情股票（配置指定，否则取列表第一只），并发获取详情与图表，构建几何。
///
/// # Arguments
/// * `source`: 数据源实现。
/// * `settings`: 已加载的设置。
pub async fn refresh(source: &dyn DashboardSource, settings: &Settings) -> DashboardReport {
    let state = DashboardState::new()
        .reduce(DashboardAction::SortChanged(settings.view.sort_key))
        .reduce(DashboardAction::SectorChanged(settings.view.sector_filter()))
        .reduce(DashboardAction::PeriodChanged(settings.view.period))
        .reduce(DashboardAction::FetchStarted);
    let generation = state.generation;

    let (signals, stats) = tokio::join!(source.fetch_signals(), source.fetch_market_stats());
    let stats = stats
        .inspect_err(|e| warn!("market stats unavailable: {}", e))
        .ok();
    let state = match signals {
        Ok(signals) => state.reduce(DashboardAction::SignalsLoaded {
            generation,
            signals,
            stats,
        }),
        Err(e) => state.reduce(DashboardAction::FetchFailed {
            generation,
            message: e.to_string(),
        }),
    };

    let selected = settings
        .view
        .symbol
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| state.visible_signals().first().map(|s| s.symbol.clone()));
    let state = state.reduce(DashboardAction::StockSelected(selected));

    let (stock, stock_error, chart, chart_error) = match &state.selected_symbol {
        Some(symbol) => {
            let (detail, payload) = tokio::join!(
                source.fetch_stock_info(symbol),
                source.fetch_chart(symbol, state.chart_period)
            );
            let (stock, stock_error) = match detail {
                Ok(info) => (Some(info), None),
                Err(e) => {
                    warn!("stock {} unavailable: {}", symbol, e);
                    (None, Some(e.to_string()))
                }
            };
            let (chart, chart_error) = match payload {
                Ok(payload) => (
                    Some(build_chart(&payload, &settings.app.layout, &settings.app.chart)),
                    None,
                ),
                Err(e) => {
                    warn!("chart {} {} unavailable: {}", symbol, state.chart_period, e);
                    (None, Some(e.to_string()))
                }
            };
            (stock, stock_error, chart, chart_error)
        }
        None => (None, None, None, None),
    };

    let rows: Vec<SignalRow> = state
        .visible_signals()
        .into_iter()
        .map(|s| SignalRow {
            signal: s.clone(),
            tier: SignalTier::from_strength(s.signal_strength),
        })
        .collect();
    info!(
        "dashboard refreshed: {} of {} signals visible, stock {}, chart {}",
        rows.len(),
        state.signals.len(),
        if stock.is_some() { "ready" } else { "absent" },
        if chart.is_some() { "ready" } else { "absent" }
    );

    DashboardReport {
        sectors: sectors(&state.signals),
        signals: rows,
        market_stats: state.market_stats,
        error: state.error,
        sort_key: state.sort_key,
        sector_filter: state.sector_filter,
        selected_symbol: state.selected_symbol,
        period: state.chart_period,
        stock,
        stock_error,
        chart,
        chart_error,
    }
}
