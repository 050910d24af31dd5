use crate::panel::{RSI_OVERBOUGHT, RSI_OVERSOLD};
use serde::Serialize;

/// RSI 区间判定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    /// 低于 30 为超卖，高于 70 为超买，边界值归入中性。
    pub fn classify(rsi: f64) -> Self {
        if rsi < RSI_OVERSOLD {
            RsiZone::Oversold
        } else if rsi > RSI_OVERBOUGHT {
            RsiZone::Overbought
        } else {
            RsiZone::Neutral
        }
    }
}

/// MACD 与信号线的相对位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdCross {
    // MACD 在信号线上方
    Golden,
    // MACD 不高于信号线
    Dead,
}

impl MacdCross {
    pub fn classify(macd: Option<f64>, signal: Option<f64>) -> Option<Self> {
        let (macd, signal) = (macd?, signal?);
        Some(if macd > signal {
            MacdCross::Golden
        } else {
            MacdCross::Dead
        })
    }
}

/// 信号强度分档，对应列表卡片的徽标颜色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalTier {
    Strong,
    Moderate,
    Weak,
}

impl SignalTier {
    pub fn from_strength(strength: f64) -> Self {
        if strength >= 80.0 {
            SignalTier::Strong
        } else if strength >= 60.0 {
            SignalTier::Moderate
        } else {
            SignalTier::Weak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_boundaries_are_neutral() {
        assert_eq!(RsiZone::classify(29.9), RsiZone::Oversold);
        assert_eq!(RsiZone::classify(30.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(70.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(70.1), RsiZone::Overbought);
    }

    #[test]
    fn test_macd_cross() {
        assert_eq!(MacdCross::classify(Some(1.0), Some(0.5)), Some(MacdCross::Golden));
        assert_eq!(MacdCross::classify(Some(0.5), Some(0.5)), Some(MacdCross::Dead));
        assert_eq!(MacdCross::classify(None, Some(0.5)), None);
    }

    #[test]
    fn test_signal_tiers() {
        assert_eq!(SignalTier::from_strength(80.0), SignalTier::Strong);
        assert_eq!(SignalTier::from_strength(79.9), SignalTier::Moderate);
        assert_eq!(SignalTier::from_strength(60.0), SignalTier::Moderate);
        assert_eq!(SignalTier::from_strength(10.0), SignalTier::Weak);
    }
}
