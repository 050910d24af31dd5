use crate::common::ChartPeriod;
use crate::market::entity::ChartPayload;
use crate::screening::entity::{BuySignal, MarketStats, StockInfo};
use crate::source::error::SourceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// # Summary
/// 后端统一响应包装 `{data, message, success}`。
///
/// # Invariants
/// - `success = true` 时 `data` 必须存在。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    // 数据载荷
    pub data: Option<T>,
    // 服务端附带的提示信息
    #[serde(default)]
    pub message: Option<String>,
    // 是否成功
    pub success: bool,
}

impl<T> ApiEnvelope<T> {
    /// # Summary
    /// 解包响应。
    ///
    /// # Logic
    /// 1. `success = false` 时转换为 `SourceError::Rejected`。
    /// 2. 成功但缺少 `data` 时视为 `SourceError::NotFound`。
    ///
    /// # Returns
    /// 成功返回载荷。
    pub fn into_result(self) -> Result<T, SourceError> {
        if !self.success {
            let message = self.message.unwrap_or_else(|| "no message".to_string());
            warn!("response rejected: {}", message);
            return Err(SourceError::Rejected(message));
        }
        match self.data {
            Some(data) => Ok(data),
            None => {
                warn!("successful response without data");
                Err(SourceError::NotFound(self.message.unwrap_or_default()))
            }
        }
    }
}

/// # Summary
/// 看板数据源接口（外部协作者）。
///
/// # Invariants
/// - 核心计算层只接收完整（可能稀疏）的成功响应，失败一律以 `SourceError` 返回。
/// - 过期请求的丢弃由调用方（状态容器的请求代次）负责，实现者无需处理竞态。
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// # Summary
    /// 获取当前全部买入信号。
    ///
    /// # Returns
    /// 成功返回信号列表，顺序不作保证。
    async fn fetch_signals(&self) -> Result<Vec<BuySignal>, SourceError>;

    /// # Summary
    /// 获取市场概览统计。
    async fn fetch_market_stats(&self) -> Result<MarketStats, SourceError>;

    /// # Summary
    /// 获取单只股票的详情信息。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    async fn fetch_stock_info(&self, symbol: &str) -> Result<StockInfo, SourceError>;

    /// # Summary
    /// 获取单只股票在指定周期内的 K 线与指标。
    ///
    /// # Arguments
    /// * `symbol`: 股票代码。
    /// * `period`: 查询周期。
    ///
    /// # Returns
    /// 成功返回图表载荷，K 线与指标均可能为空。
    async fn fetch_chart(
        &self,
        symbol: &str,
        period: ChartPeriod,
    ) -> Result<ChartPayload, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwraps_success() {
        let json = r#"{"data":[1,2,3],"message":"ok","success":true}"#;
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(json).unwrap();
        assert_eq!(env.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_envelope_rejection() {
        let json = r#"{"data":null,"message":"boom","success":false}"#;
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(json).unwrap();
        assert!(matches!(env.into_result(), Err(SourceError::Rejected(m)) if m == "boom"));

        let json = r#"{"data":null,"success":true}"#;
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(json).unwrap();
        assert!(matches!(env.into_result(), Err(SourceError::NotFound(_))));
    }
}
