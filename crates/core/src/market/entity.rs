use crate::market::error::FetchError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单个日期的价格数据点。
///
/// # Invariants
/// - 抓取完成后不可变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    // 交易日期
    pub date: NaiveDate,
    // 当日价格 (收盘价或现货价)
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// # Summary
/// 按日期降序排列的价格序列，下标 0 为最新数据。
///
/// # Invariants
/// - 非空。
/// - 日期唯一，严格降序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// # Summary
    /// 由任意顺序的数据点构建规范化序列。
    ///
    /// # Logic
    /// 1. 按日期降序稳定排序。
    /// 2. 同一日期只保留首次出现的数据点。
    /// 3. 结果为空时返回 `FetchError::Empty`。
    ///
    /// # Arguments
    /// * `points`: 原始数据点。
    ///
    /// # Returns
    /// 规范化后的序列，或空数据错误。
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self, FetchError> {
        points.sort_by(|a, b| b.date.cmp(&a.date));
        points.dedup_by_key(|p| p.date);
        if points.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 最新的数据点。
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// 向前第 `n` 个样本 (0 为最新)。
    pub fn get(&self, n: usize) -> Option<&PricePoint> {
        self.points.get(n)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// # Summary
    /// 截取最近的 `n` 个数据点，用于对齐到尾部窗口。
    ///
    /// # Logic
    /// `n` 为 0 时至少保留最新一个点，维持非空约束。
    pub fn truncated(mut self, n: usize) -> Self {
        self.points.truncate(n.max(1));
        self
    }
}
