use thiserror::Error;

/// # Summary
/// 信号计算错误枚举。
///
/// # Invariants
/// - 任何错误路径都不产出数值结果 (不会出现 NaN / Infinity)。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    // 回看步数必须 >= 1
    #[error("Invalid lookback: {0}")]
    InvalidLookback(usize),
    // 序列长度不足以回看 lookback 个样本
    #[error("Insufficient data: lookback {lookback} needs {} points, got {available}", .lookback + 1)]
    InsufficientData { lookback: usize, available: usize },
    // 基准价为零或算术溢出，视同上游数据异常
    #[error("Malformed data: {0}")]
    Malformed(String),
}

