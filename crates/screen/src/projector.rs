use sigboard_core::screening::entity::{BuySignal, SectorFilter, SortKey};
use std::collections::BTreeSet;

/// # Summary
/// 生成信号列表的可见视图。
///
/// # Logic
/// 1. 按板块精确匹配过滤。
/// 2. 按排序键对应字段降序稳定排序，数值相等时保持原有先后顺序。
///
/// # Arguments
/// * `signals`: 数据源返回的完整列表，只读借用。
/// * `filter`: 板块过滤条件。
/// * `key`: 排序键。
///
/// # Returns
/// 指向原列表元素的引用序列；对同一输入重复调用结果相同。
pub fn project<'a>(
    signals: &'a [BuySignal],
    filter: &SectorFilter,
    key: SortKey,
) -> Vec<&'a BuySignal> {
    let mut visible: Vec<&BuySignal> = signals
        .iter()
        .filter(|s| filter.matches(&s.sector))
        .collect();
    visible.sort_by(|a, b| key.value_of(b).total_cmp(&key.value_of(a)));
    visible
}

/// 列表中出现过的板块名称，去重后按字典序排列，用于板块下拉框。
pub fn sectors(signals: &[BuySignal]) -> Vec<String> {
    signals
        .iter()
        .map(|s| s.sector.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
