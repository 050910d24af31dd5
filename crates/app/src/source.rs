use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use sigboard_core::common::ChartPeriod;
use sigboard_core::market::entity::{Candle, ChartPayload, IndicatorPoint};
use sigboard_core::screening::entity::{BuySignal, MarketStats, StockInfo};
use sigboard_core::source::error::SourceError;
use sigboard_core::source::port::{ApiEnvelope, DashboardSource};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// # Summary
/// 基于本地目录的数据源，文件内容为后端响应包装 `{data, message, success}`。
///
/// # Invariants
/// - 目录结构：`signals.json`、`market_stats.json`、`stocks/<SYMBOL>.json`、
///   `chart/<SYMBOL>_<PERIOD>.json`。
/// - 股票代码只允许字母、数字、`.`、`-`、`_`，防止越出根目录。
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 股票详情文件路径，例如 `stocks/005930.json`。
    pub fn stock_path(&self, symbol: &str) -> PathBuf {
        self.root.join("stocks").join(format!("{}.json", symbol))
    }

    /// 图表文件路径，例如 `chart/005930_6M.json`。
    pub fn chart_path(&self, symbol: &str, period: ChartPeriod) -> PathBuf {
        self.root
            .join("chart")
            .join(format!("{}_{}.json", symbol, period))
    }

    async fn read_envelope<T: DeserializeOwned>(&self, path: &Path) -> Result<T, SourceError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound(path.display().to_string()),
            _ => SourceError::Io(format!("{}: {}", path.display(), e)),
        })?;
        debug!("read {} bytes from {}", bytes.len(), path.display());
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)?;
        envelope.into_result()
    }
}

/// 图表接口的 `data` 部分只含两组序列，代码与周期由请求参数补齐。
#[derive(Deserialize)]
struct ChartData {
    #[serde(default)]
    candles: Vec<Candle>,
    #[serde(default)]
    indicators: Vec<IndicatorPoint>,
}

fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && !symbol.starts_with('.')
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

fn check_symbol(symbol: &str) -> Result<(), SourceError> {
    if is_valid_symbol(symbol) {
        Ok(())
    } else {
        Err(SourceError::Rejected(format!("invalid symbol: {:?}", symbol)))
    }
}

#[async_trait]
impl DashboardSource for FileSource {
    async fn fetch_signals(&self) -> Result<Vec<BuySignal>, SourceError> {
        self.read_envelope(&self.root.join("signals.json")).await
    }

    async fn fetch_market_stats(&self) -> Result<MarketStats, SourceError> {
        self.read_envelope(&self.root.join("market_stats.json"))
            .await
    }

    async fn fetch_stock_info(&self, symbol: &str) -> Result<StockInfo, SourceError> {
        check_symbol(symbol)?;
        self.read_envelope(&self.stock_path(symbol)).await
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        period: ChartPeriod,
    ) -> Result<ChartPayload, SourceError> {
        check_symbol(symbol)?;
        let data: ChartData = self.read_envelope(&self.chart_path(symbol, period)).await?;
        Ok(ChartPayload {
            symbol: symbol.to_string(),
            period,
            candles: data.candles,
            indicators: data.indicators,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_validation() {
        assert!(is_valid_symbol("005930"));
        assert!(is_valid_symbol("BRK.B"));
        assert!(!is_valid_symbol(""));
        assert!(!is_valid_symbol("../etc"));
        assert!(!is_valid_symbol("a/b"));
    }

    #[test]
    fn test_chart_path_layout() {
        let source = FileSource::new("/data");
        assert_eq!(
            source.chart_path("005930", ChartPeriod::ThreeMonths),
            PathBuf::from("/data/chart/005930_3M.json")
        );
        assert_eq!(
            source.stock_path("005930"),
            PathBuf::from("/data/stocks/005930.json")
        );
    }
}
