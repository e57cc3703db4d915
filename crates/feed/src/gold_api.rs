use async_trait::async_trait;
use chrono::format::{Item, StrftimeItems};
use chrono::{Days, NaiveDate};
use ecopulse_core::common::Asset;
use ecopulse_core::common::time::TimeProvider;
use ecopulse_core::config::GoldApiConfig;
use ecopulse_core::market::entity::{PricePoint, PriceSeries};
use ecopulse_core::market::error::FetchError;
use ecopulse_core::market::port::{PriceSeriesProvider, Sampling};
use reqwest::{Client, Request};
use reqwest::header::CONTENT_TYPE;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 鉴权头名称
const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// # Summary
/// GoldAPI 黄金现货价格提供者。
///
/// # Invariants
/// - 每次请求都注入 `x-access-token` 与 `Content-Type` 头。
/// - 只返回窗口两端的两个点 (今天 / `window` 天前)。
#[derive(Clone)]
pub struct GoldApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    // 历史接口路径中的日期格式
    date_format: String,
    // "今天" 的来源
    clock: Arc<dyn TimeProvider>,
}

impl GoldApiProvider {
    /// # Summary
    /// 创建一个新的 GoldApiProvider 实例。
    ///
    /// # Arguments
    /// * `config`: GoldAPI 配置段。
    /// * `timeout`: 单次请求超时。
    /// * `clock`: 时间供给器。
    ///
    /// # Returns
    /// 客户端构建失败返回 `FetchError::Network`，日期格式非法返回 `FetchError::Malformed`。
    pub fn new(
        config: &GoldApiConfig,
        timeout: Duration,
        clock: Arc<dyn TimeProvider>,
    ) -> Result<Self, FetchError> {
        if StrftimeItems::new(&config.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(FetchError::Malformed(format!(
                "invalid date format '{}'",
                config.date_format
            )));
        }
        Ok(Self {
            client: crate::build_client(timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            date_format: config.date_format.clone(),
            clock,
        })
    }

    /// # Summary
    /// 计算窗口两端的日历日期。
    ///
    /// # Logic
    /// 1. 从时钟取今天。
    /// 2. 向前减去 `window` 个日历日，越界视为数据异常。
    ///
    /// # Returns
    /// `(今天, 历史日期)`。
    pub fn endpoint_dates(&self, window: usize) -> Result<(NaiveDate, NaiveDate), FetchError> {
        let today = self.clock.today();
        let days = u64::try_from(window)
            .map_err(|_| FetchError::Malformed(format!("window {} out of range", window)))?;
        let past = today
            .checked_sub_days(Days::new(days))
            .ok_or_else(|| FetchError::Malformed(format!("window {} out of range", window)))?;
        Ok((today, past))
    }

    /// # Summary
    /// 解析 GoldAPI 响应体中的价格字段。
    ///
    /// # Logic
    /// 1. 反序列化 JSON。
    /// 2. 缺少 `price` 返回 `Empty` (记录服务端 `error` 字段)。
    /// 3. 非有限浮点数或无法转换为 Decimal 视为数据异常。
    pub fn parse_price(body: &str) -> Result<Decimal, FetchError> {
        let json: GoldResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let Some(price) = json.price else {
            if let Some(err) = json.error {
                warn!("GoldAPI returned no price: {}", err);
            }
            return Err(FetchError::Empty);
        };

        if !price.is_finite() {
            return Err(FetchError::Malformed(format!("non-finite price {}", price)));
        }
        Decimal::try_from(price).map_err(|e| FetchError::Malformed(format!("price {}: {}", price, e)))
    }

    /// # Summary
    /// 构建窗口两端的价格请求，不发起网络调用。
    ///
    /// # Logic
    /// 1. 计算窗口两端日期。
    /// 2. 最新价走 `{base}/{pair}`，历史价走 `{base}/{pair}/{date}`，日期按配置格式渲染。
    /// 3. 每个请求都注入鉴权头与 JSON 内容类型头。
    ///
    /// # Returns
    /// `[(今天, 最新价请求), (历史日期, 历史价请求)]`。
    pub fn endpoint_requests(
        &self,
        asset: &Asset,
        window: usize,
    ) -> Result<[(NaiveDate, Request); 2], FetchError> {
        let (today, past) = self.endpoint_dates(window)?;
        let latest_url = format!("{}/{}", self.base_url, asset.symbol);
        let past_url = format!(
            "{}/{}/{}",
            self.base_url,
            asset.symbol,
            past.format(&self.date_format)
        );
        Ok([
            (today, self.build_request(&latest_url)?),
            (past, self.build_request(&past_url)?),
        ])
    }

    fn build_request(&self, url: &str) -> Result<Request, FetchError> {
        self.client
            .get(url)
            .header(ACCESS_TOKEN_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .build()
            .map_err(|e| FetchError::Network(format!("invalid request to {}: {}", url, e)))
    }

    /// # Summary
    /// 执行单个价格请求。
    ///
    /// # Logic
    /// 1. 非 2xx 视为网络错误。
    /// 2. 解析价格字段。
    async fn get_price(&self, request: Request) -> Result<Decimal, FetchError> {
        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::Network(format!("HTTP {}", resp.status())));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Self::parse_price(&body)
    }
}

/// # Summary
/// GoldAPI 响应结构，最新价与历史价接口共用。
#[derive(Deserialize, Debug)]
struct GoldResponse {
    price: Option<f64>,
    error: Option<String>,
}

#[async_trait]
impl PriceSeriesProvider for GoldApiProvider {
    /// # Summary
    /// 抓取最新价与 `window` 天前的历史价，组成两点序列。
    ///
    /// # Logic
    /// 1. 构建窗口两端的请求。
    /// 2. 并发执行，任一失败即整体失败。
    /// 3. 组装为降序序列。
    async fn fetch(&self, asset: &Asset, window: usize) -> Result<PriceSeries, FetchError> {
        let [(today, latest_req), (past_date, past_req)] =
            self.endpoint_requests(asset, window)?;

        let (latest, past) =
            tokio::try_join!(self.get_price(latest_req), self.get_price(past_req))?;
        debug!(
            "GoldAPI {}: {} on {}, {} on {}",
            asset.symbol, latest, today, past, past_date
        );

        PriceSeries::new(vec![
            PricePoint::new(today, latest),
            PricePoint::new(past_date, past),
        ])
    }

    fn sampling(&self) -> Sampling {
        Sampling::Endpoints
    }
}
