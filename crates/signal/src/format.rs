use ecopulse_core::signal::entity::{ChangeResult, Direction};
use rust_decimal::RoundingStrategy;

/// # Summary
/// 将涨跌幅格式化为箭头加一位小数的百分比，例如 `↑1.2%`、`↓9.1%`。
///
/// # Logic
/// 1. 根据方向选择箭头。
/// 2. 取绝对值并按四舍五入 (远离零) 保留一位小数。
pub fn format_change(change: &ChangeResult) -> String {
    let arrow = match change.direction {
        Direction::Up => "↑",
        Direction::Down => "↓",
    };
    let value = change
        .percent_change
        .abs()
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.1}%", arrow, value)
}
