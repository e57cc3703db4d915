//! # 行情数据源
//!
//! `PriceSeriesProvider` 的 HTTP 实现：Alpha Vantage (股票日线) 与 GoldAPI (黄金现货)。

pub mod alpha_vantage;
pub mod gold_api;

use ecopulse_core::market::error::FetchError;
use std::time::Duration;

/// # Summary
/// 构建带超时的 reqwest 异步客户端。
///
/// # Logic
/// 1. 确保 rustls 加密后端已安装。
/// 2. 配置超时并构建客户端，失败映射为网络错误。
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    ecopulse_core::common::tls::install_crypto_provider();
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Network(format!("Failed to build HTTP client: {}", e)))
}
