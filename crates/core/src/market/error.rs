use thiserror::Error;

/// # Summary
/// 图表数据域错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 只描述上游缺陷（非法日期），缺失值与空序列不属于错误。
/// - 非数值字段在数据源反序列化时以 `SourceError::Parse` 报告。
#[derive(Error, Debug)]
pub enum ChartError {
    // 无法解析为日历日期的日期文本
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
