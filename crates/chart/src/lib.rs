//! # `sigboard-chart` - 时间序列处理与图表坐标引擎
//!
//! 纯同步、无副作用的计算层：
//! - `aligner`: K 线与指标按日期对齐
//! - `moving_average`: 收盘价简单移动平均
//! - `geometry`: 价格到像素的映射、蜡烛与极值标注
//! - `panel`: 均线、成交量、RSI、MACD 副图几何
//! - `indicator`: 指标状态判定
//! - `pipeline`: 组合以上步骤生成详情图

pub mod aligner;
pub mod geometry;
pub mod indicator;
pub mod moving_average;
pub mod panel;
pub mod pipeline;
