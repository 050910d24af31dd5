//! K 线图几何映射：价格区间、影线、实体与极值标注。
//!
//! 纵向为线性倒置刻度 `y(p) = top + (max - p) / (max - min) * height`，
//! 价格越高 `y` 越小；横向按记录序号等分槽位。

use serde::Serialize;
use sigboard_core::common::DateKey;
use sigboard_core::config::{CalloutConfig, ChartConfig, Viewport};
use sigboard_core::market::entity::{AlignedRecord, CandleColor, Ohlc};
use tracing::debug;

/// 屏幕坐标点，原点在左上角。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// # Summary
/// 纵轴数值区间。
///
/// # Invariants
/// - `max - min` 恒为正，构造时已排除零跨度。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceDomain {
    pub min: f64,
    pub max: f64,
}

impl PriceDomain {
    /// # Summary
    /// 由一组数值构造区间。
    ///
    /// # Logic
    /// 1. 忽略非有限值，取最小与最大值并各向外扩展 `padding`。
    /// 2. 扩展后跨度仍小于 `min_range` 时，以中点为中心对称放宽到 `min_range`。
    /// 3. `min_range` 非正时按 1.0 处理。
    ///
    /// # Returns
    /// 没有任何有限值时返回 `None`。
    pub fn spanning(
        values: impl IntoIterator<Item = f64>,
        padding: f64,
        min_range: f64,
    ) -> Option<Self> {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        Some(Self::padded(lo, hi, padding, min_range))
    }

    fn padded(lo: f64, hi: f64, padding: f64, min_range: f64) -> Self {
        let floor = if min_range > 0.0 { min_range } else { 1.0 };
        let min = lo - padding;
        let max = hi + padding;
        if max - min >= floor {
            return Self { min, max };
        }
        let mid = (min + max) / 2.0;
        Self {
            min: mid - floor / 2.0,
            max: mid + floor / 2.0,
        }
    }

    /// 区间跨度。
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// 数值到纵坐标的映射。
    pub fn y(&self, value: f64, viewport: &Viewport) -> f64 {
        viewport.chart_top + (self.max - value) / self.span() * viewport.chart_height
    }
}

/// 影线：中心横坐标与最高 / 最低价纵坐标。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wick {
    pub x: f64,
    pub y_high: f64,
    pub y_low: f64,
}

/// 实体矩形，`filled = false` 时只描边。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandleBody {
    pub x: f64,
    pub width: f64,
    pub y: f64,
    pub height: f64,
    pub filled: bool,
}

/// 单根蜡烛的绘制指令。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleShape {
    pub index: usize,
    pub date: DateKey,
    pub wick: Wick,
    pub body: CandleBody,
    pub color: CandleColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremaKind {
    Highest,
    Lowest,
}

/// # Summary
/// 极值标注：圆点、标注框与文本锚点。
///
/// # Invariants
/// - 标注框左边界不小于 `CalloutConfig::min_left`。
/// - 最高价标注框上边界不小于 `min_top`；最低价标注框不低于图表底边减 `bottom_margin`。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremaCallout {
    pub index: usize,
    pub date: DateKey,
    pub kind: ExtremaKind,
    pub price: f64,
    pub marker: Point,
    pub marker_radius: f64,
    pub box_origin: Point,
    pub box_width: f64,
    pub box_height: f64,
    pub text_anchor: Point,
}

/// K 线图完整绘制结果。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CandleChart {
    pub domain: Option<PriceDomain>,
    pub candles: Vec<CandleShape>,
    pub callouts: Vec<ExtremaCallout>,
}

impl CandleChart {
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// # Summary
/// 计算价格区间 `[min(low, open, close) - pad, max(high, open, close) + pad]`。
///
/// # Returns
/// 没有任何完整 OHLC 记录时返回 `None`。
pub fn price_domain(records: &[AlignedRecord], config: &ChartConfig) -> Option<PriceDomain> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for ohlc in records.iter().filter_map(AlignedRecord::ohlc) {
        lo = lo.min(ohlc.low).min(ohlc.open).min(ohlc.close);
        hi = hi.max(ohlc.high).max(ohlc.open).max(ohlc.close);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    Some(PriceDomain::padded(lo, hi, config.price_padding, config.min_price_range))
}

/// # Summary
/// 将对齐记录映射为 K 线绘制指令。
///
/// # Logic
/// 1. 具备完整 OHLC 的记录少于两条时不绘制任何内容。
/// 2. 计算整体价格区间。
/// 3. 逐条生成影线与实体；缺少 OHLC 的记录保留槽位但不出图。
/// 4. 所有最高价等于全局最高价的记录各自获得“最高价”标注，最低价同理。
///
/// # Arguments
/// * `records`: 对齐并附加均线后的记录。
/// * `viewport`: 价格区视口。
/// * `config`: 几何参数。
pub fn map_candles(
    records: &[AlignedRecord],
    viewport: &Viewport,
    config: &ChartConfig,
) -> CandleChart {
    let complete = records.iter().filter_map(AlignedRecord::ohlc).count();
    if complete < 2 {
        debug!(
            "skip candle geometry: {} complete OHLC among {} records",
            complete,
            records.len()
        );
        return CandleChart::default();
    }
    let Some(domain) = price_domain(records, config) else {
        return CandleChart::default();
    };

    let candles: Vec<CandleShape> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record
                .ohlc()
                .map(|ohlc| candle_shape(index, record.date, &ohlc, &domain, viewport, config))
        })
        .collect();

    let callouts = extrema_callouts(records, &domain, viewport, &config.callout);

    CandleChart {
        domain: Some(domain),
        candles,
        callouts,
    }
}

fn candle_shape(
    index: usize,
    date: DateKey,
    ohlc: &Ohlc,
    domain: &PriceDomain,
    viewport: &Viewport,
    config: &ChartConfig,
) -> CandleShape {
    let center = viewport.slot_center(index);
    let body_width = (viewport.slot_width * config.body_ratio).max(config.min_body_width);
    let y_top = domain.y(ohlc.open.max(ohlc.close), viewport);
    let y_bottom = domain.y(ohlc.open.min(ohlc.close), viewport);
    let rising = ohlc.close > ohlc.open;

    CandleShape {
        index,
        date,
        wick: Wick {
            x: center,
            y_high: domain.y(ohlc.high, viewport),
            y_low: domain.y(ohlc.low, viewport),
        },
        body: CandleBody {
            x: center - body_width / 2.0,
            width: body_width,
            y: y_top,
            height: (y_bottom - y_top).max(config.min_body_height),
            filled: rising,
        },
        color: CandleColor::classify(ohlc.open, ohlc.close),
    }
}

/// # Summary
/// 生成极值标注。
///
/// # Logic
/// 1. 在所有完整记录中求最高 `high` 与最低 `low`。
/// 2. 数值完全相等的记录全部标注，不做唯一胜者裁决。
pub fn extrema_callouts(
    records: &[AlignedRecord],
    domain: &PriceDomain,
    viewport: &Viewport,
    config: &CalloutConfig,
) -> Vec<ExtremaCallout> {
    let complete: Vec<(usize, DateKey, Ohlc)> = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.ohlc().map(|ohlc| (i, r.date, ohlc)))
        .collect();

    let Some(highest) = complete.iter().map(|(_, _, o)| o.high).reduce(f64::max) else {
        return Vec::new();
    };
    let lowest = complete
        .iter()
        .map(|(_, _, o)| o.low)
        .fold(f64::INFINITY, f64::min);

    let mut callouts = Vec::new();
    for (index, date, ohlc) in &complete {
        let x = viewport.slot_center(*index);
        let box_x = (x - config.half_width).max(config.min_left);

        if ohlc.high == highest {
            let y = domain.y(ohlc.high, viewport);
            let box_y = (y + config.top_gap).max(config.min_top);
            callouts.push(callout(
                *index,
                *date,
                ExtremaKind::Highest,
                highest,
                Point::new(x, y),
                Point::new(box_x, box_y),
                config,
            ));
        }
        if ohlc.low == lowest {
            let y = domain.y(ohlc.low, viewport);
            let floor = viewport.chart_bottom() - config.bottom_margin;
            let box_y = (y - config.bottom_gap).min(floor);
            callouts.push(callout(
                *index,
                *date,
                ExtremaKind::Lowest,
                lowest,
                Point::new(x, y),
                Point::new(box_x, box_y),
                config,
            ));
        }
    }
    callouts
}

fn callout(
    index: usize,
    date: DateKey,
    kind: ExtremaKind,
    price: f64,
    marker: Point,
    box_origin: Point,
    config: &CalloutConfig,
) -> ExtremaCallout {
    ExtremaCallout {
        index,
        date,
        kind,
        price,
        marker,
        marker_radius: config.marker_radius,
        box_origin,
        box_width: config.box_width,
        box_height: config.box_height,
        text_anchor: Point::new(
            box_origin.x + config.text_inset_x,
            box_origin.y + config.text_inset_y,
        ),
    }
}
