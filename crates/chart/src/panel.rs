use crate::geometry::{Point, PriceDomain};
use serde::Serialize;
use sigboard_core::common::volume_as_f64;
use sigboard_core::config::{ChartConfig, Viewport};
use sigboard_core::market::entity::{AlignedRecord, CandleColor, MaWindow};

/// RSI 超买线。
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// RSI 超卖线。
pub const RSI_OVERSOLD: f64 = 30.0;

/// # Summary
/// 折线序列。
///
/// # Invariants
/// - 缺失值处断开，`segments` 中每段至少一个点，不跨越空洞连线。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub label: &'static str,
    pub segments: Vec<Vec<Point>>,
}

/// 水平参考线。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub label: &'static str,
    pub value: f64,
    pub y: f64,
}

/// 柱状图单柱。`y` 为上边界，`height` 非负。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub index: usize,
    pub x: f64,
    pub width: f64,
    pub y: f64,
    pub height: f64,
}

/// 成交量柱，颜色跟随当日涨跌，无 K 线的日期为 `None`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeBar {
    pub bar: Bar,
    pub volume: u64,
    pub color: Option<CandleColor>,
}

/// MACD 柱，`positive` 表示位于零轴上方。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBar {
    pub bar: Bar,
    pub value: f64,
    pub positive: bool,
}

/// 指标副图。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorPanel {
    pub domain: PriceDomain,
    pub lines: Vec<LineSeries>,
    pub reference_lines: Vec<ReferenceLine>,
    pub histogram: Vec<HistogramBar>,
}

fn trace(
    label: &'static str,
    values: impl Iterator<Item = Option<f64>>,
    domain: &PriceDomain,
    viewport: &Viewport,
) -> LineSeries {
    let mut segments = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for (index, value) in values.enumerate() {
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                current.push(Point::new(viewport.slot_center(index), domain.y(v, viewport)))
            }
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    LineSeries { label, segments }
}

fn bar_width(viewport: &Viewport, config: &ChartConfig) -> f64 {
    (viewport.slot_width * config.body_ratio).max(config.min_body_width)
}

/// # Summary
/// 生成叠加在 K 线区的均线折线。
///
/// # Logic
/// 每个 `MaWindow` 一条折线，使用与 K 线相同的价格区间与视口。
pub fn ma_lines(
    records: &[AlignedRecord],
    domain: &PriceDomain,
    viewport: &Viewport,
) -> Vec<LineSeries> {
    MaWindow::ALL
        .iter()
        .map(|&window| {
            trace(
                window.label(),
                records.iter().map(|r| r.ma(window)),
                domain,
                viewport,
            )
        })
        .collect()
}

/// # Summary
/// 生成成交量柱。
///
/// # Logic
/// 1. 以区间内最大成交量为满高。
/// 2. 最大成交量为 0 时所有柱高度为 0。
pub fn volume_bars(
    records: &[AlignedRecord],
    viewport: &Viewport,
    config: &ChartConfig,
) -> Vec<VolumeBar> {
    let max_volume = records.iter().filter_map(|r| r.volume).max().unwrap_or(0);
    let width = bar_width(viewport, config);
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let volume = record.volume?;
            let height = if max_volume == 0 {
                0.0
            } else {
                volume_as_f64(volume) / volume_as_f64(max_volume) * viewport.chart_height
            };
            Some(VolumeBar {
                bar: Bar {
                    index,
                    x: viewport.slot_center(index) - width / 2.0,
                    width,
                    y: viewport.chart_bottom() - height,
                    height,
                },
                volume,
                color: record.color,
            })
        })
        .collect()
}

/// # Summary
/// 生成 RSI 副图：固定 [0, 100] 区间，附超买 / 超卖参考线。
pub fn rsi_panel(records: &[AlignedRecord], viewport: &Viewport) -> IndicatorPanel {
    let domain = PriceDomain { min: 0.0, max: 100.0 };
    let reference_lines = vec![
        ReferenceLine {
            label: "overbought",
            value: RSI_OVERBOUGHT,
            y: domain.y(RSI_OVERBOUGHT, viewport),
        },
        ReferenceLine {
            label: "oversold",
            value: RSI_OVERSOLD,
            y: domain.y(RSI_OVERSOLD, viewport),
        },
    ];
    IndicatorPanel {
        lines: vec![trace("rsi", records.iter().map(|r| r.rsi), &domain, viewport)],
        domain,
        reference_lines,
        histogram: Vec::new(),
    }
}

/// # Summary
/// 生成 MACD 副图。
///
/// # Logic
/// 1. 区间覆盖 MACD、信号线、柱值以及零轴。
/// 2. 柱子从零轴向上或向下延伸。
pub fn macd_panel(
    records: &[AlignedRecord],
    viewport: &Viewport,
    config: &ChartConfig,
) -> IndicatorPanel {
    let values = records
        .iter()
        .flat_map(|r| [r.macd, r.macd_signal, r.macd_histogram])
        .flatten()
        .chain(std::iter::once(0.0));
    let domain = PriceDomain::spanning(values, 0.0, config.min_price_range)
        .unwrap_or(PriceDomain { min: -0.5, max: 0.5 });

    let zero_y = domain.y(0.0, viewport);
    let width = bar_width(viewport, config);
    let histogram = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let value = record.macd_histogram.filter(|v| v.is_finite())?;
            let y = domain.y(value, viewport);
            Some(HistogramBar {
                bar: Bar {
                    index,
                    x: viewport.slot_center(index) - width / 2.0,
                    width,
                    y: y.min(zero_y),
                    height: (y - zero_y).abs(),
                },
                value,
                positive: value > 0.0,
            })
        })
        .collect();

    IndicatorPanel {
        lines: vec![
            trace("macd", records.iter().map(|r| r.macd), &domain, viewport),
            trace("macd_signal", records.iter().map(|r| r.macd_signal), &domain, viewport),
        ],
        reference_lines: vec![ReferenceLine {
            label: "zero",
            value: 0.0,
            y: zero_y,
        }],
        domain,
        histogram,
    }
}
