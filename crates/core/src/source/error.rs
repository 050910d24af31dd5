use thiserror::Error;

/// # Summary
/// 外部数据源错误枚举，处理读取、解析及数据缺失等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum SourceError {
    // 本地读取失败
    #[error("IO error: {0}")]
    Io(String),
    // 响应体解析错误，如 JSON 格式不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 请求的数据未找到
    #[error("Data not found: {0}")]
    NotFound(String),
    // 服务端返回 success = false
    #[error("Rejected by server: {0}")]
    Rejected(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}
