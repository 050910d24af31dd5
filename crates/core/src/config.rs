use crate::common::index_as_f64;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub log: LogConfig,
    pub chart: ChartConfig,
    pub layout: ChartLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    // 本地数据源根目录
    pub data_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    // RUST_LOG 未设置时使用的过滤级别
    pub level: String,
    // 设置后额外按天滚动写入该目录
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

/// # Summary
/// K 线图几何映射参数。
///
/// # Invariants
/// - `min_price_range` 必须为正，非正值在使用时按 1.0 处理。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    // 价格轴上下留白（货币单位）
    pub price_padding: f64,
    // 价格区间退化时的最小跨度
    pub min_price_range: f64,
    // 实体宽度占槽位宽度的比例
    pub body_ratio: f64,
    // 实体最小宽度（像素）
    pub min_body_width: f64,
    // 实体最小高度（像素），平盘时仍可见
    pub min_body_height: f64,
    pub callout: CalloutConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            price_padding: 1000.0,
            min_price_range: 1.0,
            body_ratio: 0.6,
            min_body_width: 2.0,
            min_body_height: 1.0,
            callout: CalloutConfig::default(),
        }
    }
}

/// # Summary
/// 最高价 / 最低价标注框的像素参数。
///
/// # Invariants
/// - 默认值对应 320px 高、顶部留白 20px 的价格区。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalloutConfig {
    // 标注框相对蜡烛中心向左偏移的距离
    pub half_width: f64,
    pub box_width: f64,
    pub box_height: f64,
    // 标注框左边界下限
    pub min_left: f64,
    // 最高价标注框上边界下限
    pub min_top: f64,
    // 最高价标注框与影线顶端的间距
    pub top_gap: f64,
    // 最低价标注框与影线底端的间距
    pub bottom_gap: f64,
    // 最低价标注框距离图表底边的最小距离
    pub bottom_margin: f64,
    // 文本锚点相对标注框左上角的偏移
    pub text_inset_x: f64,
    pub text_inset_y: f64,
    // 极值圆点半径
    pub marker_radius: f64,
}

impl Default for CalloutConfig {
    fn default() -> Self {
        Self {
            half_width: 55.0,
            box_width: 110.0,
            box_height: 16.0,
            min_left: 10.0,
            min_top: 30.0,
            top_gap: 8.0,
            bottom_gap: 24.0,
            bottom_margin: 40.0,
            text_inset_x: 4.0,
            text_inset_y: 11.0,
            marker_radius: 4.0,
        }
    }
}

/// # Summary
/// 单个绘图区的像素矩形。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelBox {
    pub x0: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
}

impl PanelBox {
    /// # Summary
    /// 将绘图区按记录数等分为槽位。
    ///
    /// # Logic
    /// 槽位数为 0 时槽宽取整个宽度，避免除零。
    pub fn viewport(&self, slots: usize) -> Viewport {
        let slot_width = if slots == 0 {
            self.width
        } else {
            self.width / index_as_f64(slots)
        };
        Viewport {
            x0: self.x0,
            slot_width,
            chart_top: self.top,
            chart_height: self.height,
        }
    }
}

/// # Summary
/// 几何映射使用的视口：横向按槽位排布，纵向为线性倒置刻度。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x0: f64,
    pub slot_width: f64,
    pub chart_top: f64,
    pub chart_height: f64,
}

impl Viewport {
    /// 第 `index` 个槽位的中心横坐标。
    pub fn slot_center(&self, index: usize) -> f64 {
        self.x0 + self.slot_width * (index_as_f64(index) + 0.5)
    }

    /// 绘图区底边纵坐标。
    pub fn chart_bottom(&self) -> f64 {
        self.chart_top + self.chart_height
    }
}

/// 看板详情页四个绘图区的布局。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub price: PanelBox,
    pub volume: PanelBox,
    pub rsi: PanelBox,
    pub macd: PanelBox,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            price: PanelBox {
                x0: 20.0,
                width: 800.0,
                top: 20.0,
                height: 320.0,
            },
            volume: PanelBox {
                x0: 20.0,
                width: 800.0,
                top: 0.0,
                height: 128.0,
            },
            rsi: PanelBox {
                x0: 20.0,
                width: 800.0,
                top: 0.0,
                height: 256.0,
            },
            macd: PanelBox {
                x0: 20.0,
                width: 800.0,
                top: 0.0,
                height: 256.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data.data_dir, "data");
        assert_eq!(config.log.level, "info");
        assert_eq!(config.chart.price_padding, 1000.0);
        assert_eq!(config.chart.callout.min_top, 30.0);
        assert_eq!(config.layout.price.height, 320.0);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{"chart":{"price_padding":0.0,"callout":{"min_top":12.0}}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.chart.price_padding, 0.0);
        assert_eq!(config.chart.body_ratio, 0.6);
        assert_eq!(config.chart.callout.min_top, 12.0);
        assert_eq!(config.chart.callout.box_width, 110.0);
    }

    #[test]
    fn test_viewport_slots() {
        let panel = PanelBox {
            x0: 10.0,
            width: 100.0,
            top: 0.0,
            height: 50.0,
        };
        let vp = panel.viewport(4);
        assert_eq!(vp.slot_width, 25.0);
        assert_eq!(vp.slot_center(0), 22.5);
        assert_eq!(vp.slot_center(3), 97.5);
        assert_eq!(panel.viewport(0).slot_width, 100.0);
        assert_eq!(vp.chart_bottom(), 50.0);
    }
}
