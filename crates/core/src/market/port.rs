use crate::common::Asset;
use crate::market::entity::PriceSeries;
use crate::market::error::FetchError;
use async_trait::async_trait;

/// # Summary
/// 数据源的采样方式，决定计算涨跌幅时的回看步数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    // 返回逐日完整序列，回看第 N 个样本
    Daily,
    // 仅返回窗口两端的两个点 (最新 / N 天前)
    Endpoints,
}

impl Sampling {
    /// # Summary
    /// 将窗口长度换算为序列下标意义上的回看步数。
    ///
    /// # Arguments
    /// * `window`: 窗口长度 (样本数或日历天数)。
    ///
    /// # Returns
    /// `Daily` 返回 `window`，`Endpoints` 固定返回 1。
    pub fn lookback(self, window: usize) -> usize {
        match self {
            Sampling::Daily => window,
            Sampling::Endpoints => 1,
        }
    }
}

/// # Summary
/// 远程价格序列提供者接口。
///
/// # Invariants
/// - 实现者只做只读网络请求，不产生其他副作用。
/// - 调用运行在异步运行时的后台任务中，不得阻塞调用线程。
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// # Summary
    /// 抓取指定资产在尾部窗口内的价格序列。
    ///
    /// # Logic
    /// 1. 构建数据源请求 (含鉴权参数)。
    /// 2. 执行网络请求并解析响应。
    /// 3. 规范化为降序序列。
    ///
    /// # Arguments
    /// * `asset`: 目标资产。
    /// * `window`: 窗口长度。
    ///
    /// # Returns
    /// 成功返回非空价格序列，失败返回 `FetchError`。
    async fn fetch(&self, asset: &Asset, window: usize) -> Result<PriceSeries, FetchError>;

    /// 该数据源的采样方式。
    fn sampling(&self) -> Sampling;
}
