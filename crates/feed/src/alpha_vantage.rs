use async_trait::async_trait;
use chrono::NaiveDate;
use ecopulse_core::common::Asset;
use ecopulse_core::config::AlphaVantageConfig;
use ecopulse_core::market::entity::{PricePoint, PriceSeries};
use ecopulse_core::market::error::FetchError;
use ecopulse_core::market::port::{PriceSeriesProvider, Sampling};
use reqwest::{Client, Request};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// # Summary
/// Alpha Vantage 股票日线行情提供者。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - API Key 以查询参数 `apikey` 传递。
#[derive(Clone)]
pub struct AlphaVantageProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 服务根地址，不含 `/query`
    base_url: String,
    api_key: String,
    /// 时间序列函数名，默认 TIME_SERIES_DAILY
    function: String,
}

impl AlphaVantageProvider {
    /// # Summary
    /// 创建一个新的 AlphaVantageProvider 实例。
    ///
    /// # Logic
    /// 1. 配置请求超时。
    /// 2. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: Alpha Vantage 配置段。
    /// * `timeout`: 单次请求超时。
    ///
    /// # Returns
    /// 返回初始化后的 AlphaVantageProvider，客户端构建失败返回 `FetchError::Network`。
    pub fn new(config: &AlphaVantageConfig, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: crate::build_client(timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            function: config.function.clone(),
        })
    }

    /// # Summary
    /// 将 Alpha Vantage 响应体解析为对齐到尾部窗口的价格序列。
    ///
    /// # Logic
    /// 1. 反序列化 JSON，结构不符视为数据异常。
    /// 2. 缺少 "Time Series (Daily)" 或为空时返回 `Empty`，并记录服务端提示 (限流等)。
    /// 3. 逐条解析 ISO 日期与 "4. close" 十进制字符串。
    /// 4. 规范化为降序序列，保留最近 `window + 1` 个点。
    ///
    /// # Arguments
    /// * `body`: 原始响应体。
    /// * `window`: 回看窗口 (样本数)。
    ///
    /// # Returns
    /// 成功返回价格序列，失败返回 `FetchError`。
    pub fn parse_series(body: &str, window: usize) -> Result<PriceSeries, FetchError> {
        let json: AlphaResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let time_series = match json.time_series {
            Some(ts) if !ts.is_empty() => ts,
            _ => {
                if let Some(msg) = json
                    .error_message
                    .or(json.note)
                    .or(json.information)
                {
                    warn!("Alpha Vantage returned no series: {}", msg);
                }
                return Err(FetchError::Empty);
            }
        };

        let mut points = Vec::with_capacity(time_series.len());
        for (date, daily) in time_series {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| FetchError::Malformed(format!("date '{}': {}", date, e)))?;
            let price = Decimal::from_str(daily.close.trim()).map_err(|e| {
                FetchError::Malformed(format!("close '{}' on {}: {}", daily.close, date, e))
            })?;
            points.push(PricePoint::new(date, price));
        }

        Ok(PriceSeries::new(points)?.truncated(window.saturating_add(1)))
    }

    /// # Summary
    /// 构建 `/query` 请求，附带 function、symbol、apikey 查询参数，不发起网络调用。
    pub fn build_request(&self, asset: &Asset) -> Result<Request, FetchError> {
        self.client
            .get(format!("{}/query", self.base_url))
            .query(&[
                ("function", self.function.as_str()),
                ("symbol", asset.symbol.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .build()
            .map_err(|e| FetchError::Network(format!("invalid Alpha Vantage request: {}", e)))
    }
}

/// # Summary
/// Alpha Vantage 响应顶层结构。
///
/// # Invariants
/// - 限流或参数错误时没有时间序列字段，只有提示字段之一。
#[derive(Deserialize, Debug)]
struct AlphaResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<BTreeMap<String, AlphaDaily>>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

/// # Summary
/// 单日报价，仅取收盘价。
#[derive(Deserialize, Debug)]
struct AlphaDaily {
    // 以字符串表示的十进制收盘价
    #[serde(rename = "4. close")]
    close: String,
}

#[async_trait]
impl PriceSeriesProvider for AlphaVantageProvider {
    /// # Summary
    /// 从 Alpha Vantage 抓取日线序列。
    ///
    /// # Logic
    /// 1. 通过 `build_request` 构建请求。
    /// 2. 发起异步请求，非 2xx 视为网络错误。
    /// 3. 读取响应体并交由 `parse_series` 解析。
    ///
    /// # Arguments
    /// * `asset`: 股票标的。
    /// * `window`: 回看样本数。
    ///
    /// # Returns
    /// 成功返回最近 `window + 1` 个交易日的序列。
    async fn fetch(&self, asset: &Asset, window: usize) -> Result<PriceSeries, FetchError> {
        let resp = self
            .client
            .execute(self.build_request(asset)?)
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::Network(format!("HTTP {}", resp.status())));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let series = Self::parse_series(&body, window)?;
        debug!(
            "Alpha Vantage {}: {} points, latest {:?}",
            asset.symbol,
            series.len(),
            series.latest()
        );
        Ok(series)
    }

    fn sampling(&self) -> Sampling {
        Sampling::Daily
    }
}
