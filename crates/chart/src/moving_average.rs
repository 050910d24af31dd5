use sigboard_core::market::entity::{AlignedRecord, MaWindow};

/// # Summary
/// 计算收盘价的简单移动平均。
///
/// # Logic
/// 1. 对每个位置 `i`，取 `records[i + 1 - window ..= i]` 的收盘价。
/// 2. 历史不足 `window` 根时结果缺失。
/// 3. 窗口内任一收盘价缺失时结果缺失，不跳过空洞。
///
/// # Arguments
/// * `records`: 按日期升序的对齐记录。
/// * `window`: 窗口长度，0 视为无效窗口。
///
/// # Returns
/// 与 `records` 等长的均值序列。
pub fn moving_average(records: &[AlignedRecord], window: usize) -> Vec<Option<f64>> {
    (0..records.len())
        .map(|end| trailing_mean(records, end, window))
        .collect()
}

fn trailing_mean(records: &[AlignedRecord], end: usize, window: usize) -> Option<f64> {
    if window == 0 || end + 1 < window {
        return None;
    }
    let slice = records.get(end + 1 - window..=end)?;
    let mut sum = 0.0;
    let mut count = 0.0;
    for record in slice {
        sum += record.close?;
        count += 1.0;
    }
    Some(sum / count)
}

/// # Summary
/// 为对齐序列附加全部均线字段。
///
/// # Logic
/// 每个窗口独立计算，再逐条写入 `ma5` / `ma20` / `ma60` / `ma120`。
pub fn with_moving_averages(records: Vec<AlignedRecord>) -> Vec<AlignedRecord> {
    let columns: Vec<(MaWindow, Vec<Option<f64>>)> = MaWindow::ALL
        .iter()
        .map(|&window| (window, moving_average(&records, window.periods())))
        .collect();

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            columns.iter().fold(record, |acc, (window, values)| {
                acc.with_ma(*window, values.get(i).copied().flatten())
            })
        })
        .collect()
}
