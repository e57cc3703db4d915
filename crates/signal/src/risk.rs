use ecopulse_core::signal::entity::{RiskAssessment, RiskCategory, RiskRule, Signal};
use tracing::debug;

/// # Summary
/// 基于规则表的风险评分器。
///
/// # Invariants
/// - 纯函数，无副作用。
/// - 每条规则独立求值，贡献分累加；分数只增不减，类别单调不降。
#[derive(Debug, Clone)]
pub struct RiskScorer {
    rules: Vec<RiskRule>,
}

impl RiskScorer {
    pub fn new(rules: Vec<RiskRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    /// # Summary
    /// 将若干信号映射为数值分数与风险类别。
    ///
    /// # Logic
    /// 1. 对每个信号，遍历类别匹配的规则。
    /// 2. 涨跌幅严格低于阈值时累加该规则的分数 (饱和加法)。
    /// 3. 由总分推导类别：>= 4 Warning，>= 2 Risky，其余 Stable。
    ///
    /// # Arguments
    /// * `signals`: 待评估信号，可为空 (得分 0)。
    ///
    /// # Returns
    /// 风险评估结果。
    pub fn score(&self, signals: &[Signal]) -> RiskAssessment {
        let mut score: u32 = 0;
        for signal in signals {
            for rule in self.rules.iter().filter(|r| r.kind == signal.kind) {
                if signal.change.percent_change < rule.below {
                    debug!(
                        "Rule hit: {} {} < {} (+{})",
                        rule.kind, signal.change.percent_change, rule.below, rule.points
                    );
                    score = score.saturating_add(rule.points);
                }
            }
        }

        RiskAssessment {
            score,
            category: RiskCategory::from_score(score),
        }
    }
}
