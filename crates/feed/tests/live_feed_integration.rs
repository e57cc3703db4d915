use ecopulse_core::common::time::RealTimeProvider;
use ecopulse_core::common::{Asset, SignalKind};
use ecopulse_core::config::{AlphaVantageConfig, GoldApiConfig};
use ecopulse_core::market::port::PriceSeriesProvider;
use ecopulse_feed::alpha_vantage::AlphaVantageProvider;
use ecopulse_feed::gold_api::GoldApiProvider;
use std::env;
use std::sync::Arc;
use std::time::Duration;

/// # Summary
/// 集成测试：真实请求 Alpha Vantage SPY 日线。
///
/// # Logic
/// 1. 加载 .env 环境变量。
/// 2. 从 `ECOPULSE_ALPHA_VANTAGE_KEY` 读取 API Key。
/// 3. 抓取 30 日窗口并断言序列长度为 31。
#[tokio::test]
#[ignore] // 默认忽略，仅在手动测试时通过环境变量开启
async fn test_alpha_vantage_real_fetch() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AlphaVantageConfig {
        api_key: env::var("ECOPULSE_ALPHA_VANTAGE_KEY")?,
        ..AlphaVantageConfig::default()
    };
    let provider = AlphaVantageProvider::new(&config, Duration::from_secs(10))?;
    let series = provider
        .fetch(&Asset::new("SPY", SignalKind::Equity), 30)
        .await?;

    assert_eq!(series.len(), 31);
    println!("SPY latest: {:?}", series.latest());
    Ok(())
}

/// # Summary
/// 集成测试：真实请求 GoldAPI 最新价与 30 天前价格。
#[tokio::test]
#[ignore] // 默认忽略
async fn test_gold_api_real_fetch() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = GoldApiConfig {
        api_key: env::var("ECOPULSE_GOLD_API_KEY")?,
        ..GoldApiConfig::default()
    };
    let provider =
        GoldApiProvider::new(&config, Duration::from_secs(10), Arc::new(RealTimeProvider))?;
    let series = provider
        .fetch(&Asset::new("XAU/USD", SignalKind::Gold), 30)
        .await?;

    assert_eq!(series.len(), 2);
    println!("XAU/USD: {:?}", series.points());
    Ok(())
}
