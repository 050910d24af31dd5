use crate::aligner::align;
use crate::geometry::{CandleChart, map_candles};
use crate::indicator::{MacdCross, RsiZone};
use crate::moving_average::with_moving_averages;
use crate::panel::{
    IndicatorPanel, LineSeries, VolumeBar, ma_lines, macd_panel, rsi_panel, volume_bars,
};
use serde::Serialize;
use sigboard_core::common::ChartPeriod;
use sigboard_core::config::{ChartConfig, ChartLayout};
use sigboard_core::market::entity::{AlignedRecord, ChartPayload};
use tracing::debug;

/// 最近一个交易日的指标判定，供详情页摘要区展示。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatestIndicators {
    pub rsi: Option<f64>,
    pub rsi_zone: Option<RsiZone>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_cross: Option<MacdCross>,
}

/// # Summary
/// 单只股票详情图的完整渲染数据。
///
/// # Invariants
/// - `records` 按日期升序，各绘图区的 `index` 均指向该序列。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub symbol: String,
    pub period: ChartPeriod,
    pub records: Vec<AlignedRecord>,
    pub candles: CandleChart,
    pub ma_lines: Vec<LineSeries>,
    pub volume: Vec<VolumeBar>,
    pub rsi: IndicatorPanel,
    pub macd: IndicatorPanel,
    pub latest: Option<LatestIndicators>,
}

/// # Summary
/// 从图表载荷构建详情图。
///
/// # Logic
/// 1. 对齐 K 线与指标。
/// 2. 附加 MA5 / MA20 / MA60 / MA120。
/// 3. 按布局为价格区、成交量、RSI、MACD 分别生成几何。
/// 4. 取最后一个带指标的交易日生成摘要。
///
/// # Arguments
/// * `payload`: 数据源返回的图表载荷。
/// * `layout`: 各绘图区像素矩形。
/// * `config`: 几何参数。
pub fn build_chart(
    payload: &ChartPayload,
    layout: &ChartLayout,
    config: &ChartConfig,
) -> ChartView {
    let records = with_moving_averages(align(&payload.candles, &payload.indicators));
    let slots = records.len();

    let price_vp = layout.price.viewport(slots);
    let candles = map_candles(&records, &price_vp, config);
    let ma_lines = match &candles.domain {
        Some(domain) => ma_lines(&records, domain, &price_vp),
        None => Vec::new(),
    };
    let volume = volume_bars(&records, &layout.volume.viewport(slots), config);
    let rsi = rsi_panel(&records, &layout.rsi.viewport(slots));
    let macd = macd_panel(&records, &layout.macd.viewport(slots), config);
    let latest = latest_indicators(&records);

    debug!(
        "built chart {} {}: {} records, {} candles, {} callouts",
        payload.symbol,
        payload.period,
        slots,
        candles.candles.len(),
        candles.callouts.len()
    );

    ChartView {
        symbol: payload.symbol.clone(),
        period: payload.period,
        records,
        candles,
        ma_lines,
        volume,
        rsi,
        macd,
        latest,
    }
}

fn latest_indicators(records: &[AlignedRecord]) -> Option<LatestIndicators> {
    let last = records
        .iter()
        .rev()
        .find(|r| r.rsi.is_some() || r.macd.is_some())?;
    Some(LatestIndicators {
        rsi: last.rsi,
        rsi_zone: last.rsi.map(RsiZone::classify),
        macd: last.macd,
        macd_signal: last.macd_signal,
        macd_cross: MacdCross::classify(last.macd, last.macd_signal),
    })
}
