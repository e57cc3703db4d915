use crate::common::SignalKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 涨跌方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// # Summary
/// 涨跌幅计算结果，派生数据，不做持久化。
///
/// # Invariants
/// - `percent_change >= 0` 时 `direction` 为 `Up`，否则为 `Down`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeResult {
    // 百分比涨跌幅 (例如 -9.09 表示下跌 9.09%)
    pub percent_change: Decimal,
    // 涨跌方向
    pub direction: Direction,
}

impl ChangeResult {
    pub fn from_percent(percent_change: Decimal) -> Self {
        let direction = if percent_change.is_sign_negative() && !percent_change.is_zero() {
            Direction::Down
        } else {
            Direction::Up
        };
        Self {
            percent_change,
            direction,
        }
    }
}

/// # Summary
/// 带类别标签的涨跌信号，是风险规则表的输入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub change: ChangeResult,
}

impl Signal {
    pub fn new(kind: SignalKind, change: ChangeResult) -> Self {
        Self { kind, change }
    }
}

/// # Summary
/// 风险类别，按严重程度全序排列。
///
/// # Invariants
/// - 变体声明顺序即严重程度顺序：Stable < Risky < Warning。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Stable,
    Risky,
    Warning,
}

impl RiskCategory {
    /// # Summary
    /// 由累计分数推导风险类别。
    ///
    /// # Logic
    /// 分数 >= 4 为 Warning，>= 2 为 Risky，其余为 Stable。
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 4 => RiskCategory::Warning,
            s if s >= 2 => RiskCategory::Risky,
            _ => RiskCategory::Stable,
        }
    }

    /// 展示用文案。
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Stable => "Stable ✅",
            RiskCategory::Risky => "Risky ⚠️",
            RiskCategory::Warning => "Recession Warning 🚨",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::Stable => write!(f, "Stable"),
            RiskCategory::Risky => write!(f, "Risky"),
            RiskCategory::Warning => write!(f, "Warning"),
        }
    }
}

/// # Summary
/// 风险评估结果：数值分数与类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub category: RiskCategory,
}

/// # Summary
/// 风险规则三元组：{信号类别, 阈值, 贡献分}。
///
/// # Invariants
/// - 涨跌幅严格低于 `below` 时贡献 `points` 分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRule {
    // 匹配的信号类别
    pub kind: SignalKind,
    // 触发阈值 (百分比)
    pub below: Decimal,
    // 触发后累加的分数
    pub points: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_direction_from_percent() {
        assert_eq!(ChangeResult::from_percent(dec!(1.5)).direction, Direction::Up);
        assert_eq!(ChangeResult::from_percent(dec!(0)).direction, Direction::Up);
        assert_eq!(ChangeResult::from_percent(dec!(-0.01)).direction, Direction::Down);
    }

    #[test]
    fn test_category_thresholds_and_order() {
        assert_eq!(RiskCategory::from_score(0), RiskCategory::Stable);
        assert_eq!(RiskCategory::from_score(1), RiskCategory::Stable);
        assert_eq!(RiskCategory::from_score(2), RiskCategory::Risky);
        assert_eq!(RiskCategory::from_score(3), RiskCategory::Risky);
        assert_eq!(RiskCategory::from_score(4), RiskCategory::Warning);
        assert!(RiskCategory::Stable < RiskCategory::Risky);
        assert!(RiskCategory::Risky < RiskCategory::Warning);
    }
}
