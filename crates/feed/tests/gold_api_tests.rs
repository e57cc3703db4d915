use chrono::{NaiveDate, TimeZone, Utc};
use ecopulse_core::common::time::FakeClockProvider;
use ecopulse_core::common::{Asset, SignalKind};
use ecopulse_core::config::GoldApiConfig;
use ecopulse_core::market::error::FetchError;
use ecopulse_core::market::port::{PriceSeriesProvider, Sampling};
use ecopulse_feed::gold_api::GoldApiProvider;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

fn provider_at(y: i32, m: u32, d: u32) -> GoldApiProvider {
    configured_at(&GoldApiConfig::default(), y, m, d)
}

fn configured_at(config: &GoldApiConfig, y: i32, m: u32, d: u32) -> GoldApiProvider {
    let clock = Arc::new(FakeClockProvider::new(
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
    ));
    GoldApiProvider::new(config, Duration::from_secs(1), clock).unwrap()
}

#[test]
fn test_parse_price() {
    let body = r#"{ "timestamp": 1735689600, "metal": "XAU", "currency": "USD", "price": 2624.5 }"#;
    assert_eq!(GoldApiProvider::parse_price(body).unwrap(), dec!(2624.5));
}

#[test]
fn test_parse_price_missing_is_empty() {
    let body = r#"{ "error": "No data available for this date" }"#;
    assert_eq!(GoldApiProvider::parse_price(body), Err(FetchError::Empty));
}

#[test]
fn test_parse_price_wrong_type_is_malformed() {
    let body = r#"{ "price": "two thousand" }"#;
    assert!(matches!(
        GoldApiProvider::parse_price(body),
        Err(FetchError::Malformed(_))
    ));
}

/// # Summary
/// 历史日期按日历日回看，跨月正确。
#[test]
fn test_endpoint_dates_use_calendar_days() {
    let provider = provider_at(2025, 3, 10);
    let (today, past) = provider.endpoint_dates(30).unwrap();
    assert_eq!(today, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    assert_eq!(past, NaiveDate::from_ymd_opt(2025, 2, 8).unwrap());
    assert_eq!(provider.sampling(), Sampling::Endpoints);
}

#[test]
fn test_invalid_date_format_rejected() {
    let config = GoldApiConfig {
        date_format: "%Y-%Q".to_string(),
        ..GoldApiConfig::default()
    };
    let clock = Arc::new(FakeClockProvider::new(Utc::now()));
    assert!(matches!(
        GoldApiProvider::new(&config, Duration::from_secs(1), clock),
        Err(FetchError::Malformed(_))
    ));
}

/// # Summary
/// 两个请求都带鉴权头与内容类型头，历史价路径按配置的日期格式渲染。
#[test]
fn test_endpoint_requests_carry_token_and_dated_path() {
    let config = GoldApiConfig {
        api_key: "goldapi-test-key".to_string(),
        ..GoldApiConfig::default()
    };
    let provider = configured_at(&config, 2025, 3, 10);
    let asset = Asset::new("XAU/USD", SignalKind::Gold);

    let [(today, latest), (past, history)] = provider.endpoint_requests(&asset, 30).unwrap();
    assert_eq!(today, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    assert_eq!(past, NaiveDate::from_ymd_opt(2025, 2, 8).unwrap());
    assert_eq!(latest.url().as_str(), "https://www.goldapi.io/api/XAU/USD");
    assert_eq!(
        history.url().as_str(),
        "https://www.goldapi.io/api/XAU/USD/2025-02-08"
    );

    for request in [&latest, &history] {
        assert_eq!(*request.method(), reqwest::Method::GET);
        assert_eq!(
            request.headers().get("x-access-token").unwrap(),
            "goldapi-test-key"
        );
        assert_eq!(
            request.headers().get(reqwest::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}

#[test]
fn test_custom_date_format_in_history_path() {
    let config = GoldApiConfig {
        base_url: "http://127.0.0.1:9/api/".to_string(),
        date_format: "%Y%m%d".to_string(),
        ..GoldApiConfig::default()
    };
    let provider = configured_at(&config, 2024, 1, 5);
    let asset = Asset::new("XAU/EUR", SignalKind::Gold);

    let [_, (_, history)] = provider.endpoint_requests(&asset, 7).unwrap();
    assert_eq!(history.url().path(), "/api/XAU/EUR/20231229");
}
