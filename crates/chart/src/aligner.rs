use sigboard_core::common::DateKey;
use sigboard_core::market::entity::{AlignedRecord, Candle, IndicatorPoint};
use std::collections::BTreeMap;
use tracing::debug;

/// # Summary
/// 将 K 线序列与指标序列按日期合并为一条对齐时间线。
///
/// # Logic
/// 1. 以 `DateKey` 为键建立有序映射，先写入全部 K 线字段。
/// 2. 逐个指标点：日期已存在则合并，否则新建仅含指标的记录。
/// 3. 按日期升序输出映射中的全部记录。
///
/// # Arguments
/// * `candles`: K 线序列，可无序、可含重复日期。
/// * `indicators`: 指标序列，可无序、可稀疏。
///
/// # Returns
/// 按日期升序、无重复日期的记录序列，长度等于两侧日期并集的大小。
pub fn align(candles: &[Candle], indicators: &[IndicatorPoint]) -> Vec<AlignedRecord> {
    let mut by_date: BTreeMap<DateKey, AlignedRecord> = BTreeMap::new();

    for candle in candles {
        by_date
            .entry(candle.date)
            .or_insert_with(|| AlignedRecord::empty(candle.date))
            .merge_candle(candle);
    }

    let mut indicator_only = 0usize;
    for point in indicators {
        by_date
            .entry(point.date)
            .or_insert_with(|| {
                indicator_only += 1;
                AlignedRecord::empty(point.date)
            })
            .merge_indicator(point);
    }

    debug!(
        "aligned {} candles and {} indicator points into {} records ({} indicator-only)",
        candles.len(),
        indicators.len(),
        by_date.len(),
        indicator_only
    );

    by_date.into_values().collect()
}
