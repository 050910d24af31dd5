use crate::common::{ChartPeriod, DateKey};
use serde::{Deserialize, Serialize};

/// # Summary
/// 单根日 K 线数据实体，记录特定交易日内的行情波动。
///
/// # Invariants
/// - 约定 `low <= min(open, close) <= max(open, close) <= high`，但上游不保证，
///   下游计算必须容忍违反该约定的数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    // 交易日
    pub date: DateKey,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 成交量
    pub volume: u64,
}

/// # Summary
/// 单日技术指标快照，数值由服务端预先计算。
///
/// # Invariants
/// - 任意字段都可能缺失（`null`）。
/// - 日期理论上是 K 线日期的子集，但可能稀疏或错位。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: DateKey,
    #[serde(default)]
    pub rsi: Option<f64>,
    #[serde(default)]
    pub macd: Option<f64>,
    #[serde(default, alias = "macdSignal")]
    pub macd_signal: Option<f64>,
    #[serde(default, alias = "macdHistogram")]
    pub macd_histogram: Option<f64>,
}

/// # Summary
/// K 线涨跌着色分类。
///
/// # Invariants
/// - 平盘（close == open）按下跌处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandleColor {
    Rising,
    Falling,
}

impl CandleColor {
    /// 按开收盘价判定涨跌。
    pub fn classify(open: f64, close: f64) -> Self {
        if close > open {
            CandleColor::Rising
        } else {
            CandleColor::Falling
        }
    }
}

/// # Summary
/// 系统支持的移动平均窗口。
///
/// # Invariants
/// - 每个窗口在 `AlignedRecord` 上有独立字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaWindow {
    Ma5,
    Ma20,
    Ma60,
    Ma120,
}

impl MaWindow {
    /// 全部窗口，按长度升序。
    pub const ALL: [MaWindow; 4] = [MaWindow::Ma5, MaWindow::Ma20, MaWindow::Ma60, MaWindow::Ma120];

    /// 窗口长度（交易日数）。
    pub fn periods(self) -> usize {
        match self {
            MaWindow::Ma5 => 5,
            MaWindow::Ma20 => 20,
            MaWindow::Ma60 => 60,
            MaWindow::Ma120 => 120,
        }
    }

    /// 图例标签。
    pub fn label(self) -> &'static str {
        match self {
            MaWindow::Ma5 => "MA5",
            MaWindow::Ma20 => "MA20",
            MaWindow::Ma60 => "MA60",
            MaWindow::Ma120 => "MA120",
        }
    }
}

/// 完整的开高低收四价。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// # Summary
/// 对齐后的单日记录：K 线字段与指标字段的并集，外加派生的均线与着色。
///
/// # Invariants
/// - 每个日期在对齐序列中只出现一次。
/// - 仅有指标的日期，其 K 线字段全部为 `None`。
/// - 构建完成后不再修改，换股或换周期时整体丢弃。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRecord {
    pub date: DateKey,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub ma5: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    pub ma120: Option<f64>,
    pub color: Option<CandleColor>,
}

impl AlignedRecord {
    /// 创建一个所有字段均缺失的记录。
    pub fn empty(date: DateKey) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close: None,
            volume: None,
            rsi: None,
            macd: None,
            macd_signal: None,
            macd_histogram: None,
            ma5: None,
            ma20: None,
            ma60: None,
            ma120: None,
            color: None,
        }
    }

    /// # Summary
    /// 写入 K 线字段。
    ///
    /// # Logic
    /// 覆盖全部 OHLCV 字段，同一日期重复出现时后写入者生效。
    pub fn merge_candle(&mut self, candle: &Candle) {
        self.open = Some(candle.open);
        self.high = Some(candle.high);
        self.low = Some(candle.low);
        self.close = Some(candle.close);
        self.volume = Some(candle.volume);
        self.refresh_color();
    }

    /// # Summary
    /// 写入指标字段。
    ///
    /// # Logic
    /// 覆盖全部四个指标字段（包括 `None`），与重复 K 线的处理方式一致。
    pub fn merge_indicator(&mut self, point: &IndicatorPoint) {
        self.rsi = point.rsi;
        self.macd = point.macd;
        self.macd_signal = point.macd_signal;
        self.macd_histogram = point.macd_histogram;
    }

    fn refresh_color(&mut self) {
        self.color = match (self.open, self.close) {
            (Some(open), Some(close)) => Some(CandleColor::classify(open, close)),
            _ => None,
        };
    }

    /// 四价均存在且为有限值时返回 `Ohlc`。
    pub fn ohlc(&self) -> Option<Ohlc> {
        let ohlc = Ohlc {
            open: self.open?,
            high: self.high?,
            low: self.low?,
            close: self.close?,
        };
        [ohlc.open, ohlc.high, ohlc.low, ohlc.close]
            .iter()
            .all(|v| v.is_finite())
            .then_some(ohlc)
    }

    /// 读取指定窗口的均线值。
    pub fn ma(&self, window: MaWindow) -> Option<f64> {
        match window {
            MaWindow::Ma5 => self.ma5,
            MaWindow::Ma20 => self.ma20,
            MaWindow::Ma60 => self.ma60,
            MaWindow::Ma120 => self.ma120,
        }
    }

    /// 返回附带指定窗口均线值的新记录。
    pub fn with_ma(mut self, window: MaWindow, value: Option<f64>) -> Self {
        match window {
            MaWindow::Ma5 => self.ma5 = value,
            MaWindow::Ma20 => self.ma20 = value,
            MaWindow::Ma60 => self.ma60 = value,
            MaWindow::Ma120 => self.ma120 = value,
        }
        self
    }
}

/// # Summary
/// 图表接口的数据载荷：单只股票、单个周期的 K 线与指标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub symbol: String,
    pub period: ChartPeriod,
    #[serde(default)]
    pub candles: Vec<Candle>,
    #[serde(default)]
    pub indicators: Vec<IndicatorPoint>,
}
