use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use sigboard_core::common::ChartPeriod;
use sigboard_core::config::AppConfig;
use sigboard_core::screening::entity::{SectorFilter, SortKey};
use std::path::Path;
use thiserror::Error;

/// 环境变量前缀，例如 `SIGBOARD__DATA__DATA_DIR`。
pub const ENV_PREFIX: &str = "SIGBOARD";
/// 指定额外配置文件路径的环境变量。
pub const CONFIG_PATH_ENV: &str = "SIGBOARD_CONFIG";

/// # Summary
/// 配置加载错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum ConfigError {
    // 配置源读取或反序列化失败
    #[error("Config load error: {0}")]
    Load(#[from] config::ConfigError),
    // 数值越界等语义错误
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// # Summary
/// 启动时的视图选择：排序、板块、详情图股票与周期。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    // 未设置时取排序后的第一只股票
    pub symbol: Option<String>,
    pub period: ChartPeriod,
    pub sort_key: SortKey,
    // 空字符串或未设置表示全部板块
    pub sector: Option<String>,
}

impl ViewConfig {
    pub fn sector_filter(&self) -> SectorFilter {
        SectorFilter::from(self.sector.clone())
    }
}

/// 应用完整设置。
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub app: AppConfig,
    pub view: ViewConfig,
}

impl Settings {
    /// # Summary
    /// 按层级加载设置。
    ///
    /// # Logic
    /// 1. 内置默认值。
    /// 2. 可选的 `config/default.toml`。
    /// 3. 可选的显式配置文件（存在时必须可读）。
    /// 4. `SIGBOARD__` 前缀的环境变量，`__` 分隔层级。
    /// 5. 校验数值范围。
    ///
    /// # Arguments
    /// * `config_file`: 显式配置文件路径，通常来自 `SIGBOARD_CONFIG`。
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::with_name("config/default").required(false));
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }
        let raw = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let app: AppConfig = raw.clone().try_deserialize()?;
        let view = match raw.get::<ViewConfig>("view") {
            Ok(view) => view,
            Err(config::ConfigError::NotFound(_)) => ViewConfig::default(),
            Err(e) => return Err(e.into()),
        };

        let settings = Self { app, view };
        settings.validate()?;
        Ok(settings)
    }

    /// 校验几何参数，避免出现零宽或负高的绘图区。
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chart = &self.app.chart;
        if !(chart.body_ratio > 0.0 && chart.body_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "chart.body_ratio must be in (0, 1], got {}",
                chart.body_ratio
            )));
        }
        if !chart.price_padding.is_finite() || chart.price_padding < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "chart.price_padding must be a non-negative number, got {}",
                chart.price_padding
            )));
        }
        let layout = &self.app.layout;
        for (name, panel) in [
            ("price", &layout.price),
            ("volume", &layout.volume),
            ("rsi", &layout.rsi),
            ("macd", &layout.macd),
        ] {
            if !(panel.width > 0.0 && panel.height > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "layout.{} must have positive width and height",
                    name
                )));
            }
        }
        Ok(())
    }
}
