use ecopulse_core::market::entity::PriceSeries;
use ecopulse_core::signal::entity::ChangeResult;
use ecopulse_core::signal::error::SignalError;
use rust_decimal::Decimal;

/// # Summary
/// 计算最新价相对于向前第 `lookback` 个样本的百分比涨跌幅。
///
/// # Invariants
/// - 回看的是第 N 个样本，而非 N 个日历日之前；节假日造成的间隔会改变实际窗口。
/// - 任何错误路径都不返回数值。
///
/// # Logic
/// 1. 校验 `lookback >= 1`。
/// 2. 校验序列长度 > `lookback`。
/// 3. 取下标 0 为最新价，下标 `lookback` 为基准价。
/// 4. 基准价为零视为数据异常。
/// 5. 以 Decimal 计算 `(latest - past) / past * 100`，溢出同样视为数据异常。
///
/// # Arguments
/// * `series`: 日期降序的价格序列。
/// * `lookback`: 回看步数。
///
/// # Returns
/// 成功返回 `ChangeResult`，失败返回 `SignalError`。
pub fn compute(series: &PriceSeries, lookback: usize) -> Result<ChangeResult, SignalError> {
    if lookback == 0 {
        return Err(SignalError::InvalidLookback(lookback));
    }

    let insufficient = || SignalError::InsufficientData {
        lookback,
        available: series.len(),
    };
    let latest = series.latest().ok_or_else(insufficient)?.price;
    let past = series.get(lookback).ok_or_else(insufficient)?;

    if past.price.is_zero() {
        return Err(SignalError::Malformed(format!(
            "zero baseline price on {}",
            past.date
        )));
    }

    let overflow = || SignalError::Malformed("percent change overflow".into());
    let percent = latest
        .checked_sub(past.price)
        .and_then(|delta| delta.checked_div(past.price))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(overflow)?;

    Ok(ChangeResult::from_percent(percent))
}
