use chrono::NaiveDate;
use ecopulse_core::common::{Asset, SignalKind};
use ecopulse_core::config::AlphaVantageConfig;
use ecopulse_core::market::error::FetchError;
use ecopulse_feed::alpha_vantage::AlphaVantageProvider;
use rust_decimal_macros::dec;
use std::time::Duration;

const SAMPLE: &str = r#"{
    "Meta Data": {
        "1. Information": "Daily Prices (open, high, low, close) and Volumes",
        "2. Symbol": "SPY"
    },
    "Time Series (Daily)": {
        "2025-01-03": { "1. open": "587.53", "4. close": "591.95", "5. volume": "37888459" },
        "2025-01-06": { "1. open": "596.27", "4. close": "595.36", "5. volume": "47679442" },
        "2025-01-02": { "1. open": "589.39", "4. close": "584.64", "5. volume": "50203975" },
        "2024-12-31": { "1. open": "592.26", "4. close": "586.08", "5. volume": "57052663" }
    }
}"#;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// # Summary
/// 解析日线响应：按日期降序排列，收盘价为精确十进制。
#[test]
fn test_parse_daily_series() {
    let series = AlphaVantageProvider::parse_series(SAMPLE, 30).unwrap();
    assert_eq!(series.len(), 4);
    assert_eq!(series.latest().unwrap().date, date(2025, 1, 6));
    assert_eq!(series.latest().unwrap().price, dec!(595.36));
    assert_eq!(series.get(3).unwrap().date, date(2024, 12, 31));
    assert_eq!(series.get(3).unwrap().price, dec!(586.08));
}

/// # Summary
/// 对齐尾部窗口：只保留最近 window + 1 个交易日。
#[test]
fn test_parse_aligns_to_trailing_window() {
    let series = AlphaVantageProvider::parse_series(SAMPLE, 2).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.get(2).unwrap().date, date(2025, 1, 2));
}

#[test]
fn test_rate_limit_note_is_empty() {
    let body = r#"{ "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute." }"#;
    assert_eq!(AlphaVantageProvider::parse_series(body, 30), Err(FetchError::Empty));

    let info = r#"{ "Information": "The **demo** API key is for demo purposes only." }"#;
    assert_eq!(AlphaVantageProvider::parse_series(info, 30), Err(FetchError::Empty));

    let empty = r#"{ "Time Series (Daily)": {} }"#;
    assert_eq!(AlphaVantageProvider::parse_series(empty, 30), Err(FetchError::Empty));
}

#[test]
fn test_unparsable_close_is_malformed() {
    let body = r#"{ "Time Series (Daily)": { "2025-01-06": { "4. close": "N/A" } } }"#;
    assert!(matches!(
        AlphaVantageProvider::parse_series(body, 30),
        Err(FetchError::Malformed(_))
    ));
}

#[test]
fn test_bad_date_or_body_is_malformed() {
    let body = r#"{ "Time Series (Daily)": { "06/01/2025": { "4. close": "1.0" } } }"#;
    assert!(matches!(
        AlphaVantageProvider::parse_series(body, 30),
        Err(FetchError::Malformed(_))
    ));
    assert!(matches!(
        AlphaVantageProvider::parse_series("<html>busy</html>", 30),
        Err(FetchError::Malformed(_))
    ));
}

/// # Summary
/// 请求指向 `/query`，查询参数携带函数名、标的与 API Key。
#[test]
fn test_request_query_parameters() {
    let config = AlphaVantageConfig {
        base_url: "https://www.alphavantage.co/".to_string(),
        api_key: "av-test-key".to_string(),
        ..AlphaVantageConfig::default()
    };
    let provider = AlphaVantageProvider::new(&config, Duration::from_secs(1)).unwrap();
    let request = provider
        .build_request(&Asset::new("SPY", SignalKind::Equity))
        .unwrap();

    assert_eq!(*request.method(), reqwest::Method::GET);
    assert_eq!(request.url().host_str(), Some("www.alphavantage.co"));
    assert_eq!(request.url().path(), "/query");
    let query: Vec<(String, String)> = request
        .url()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        query,
        vec![
            ("function".to_string(), "TIME_SERIES_DAILY".to_string()),
            ("symbol".to_string(), "SPY".to_string()),
            ("apikey".to_string(), "av-test-key".to_string()),
        ]
    );
}
