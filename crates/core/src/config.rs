use crate::common::SignalKind;
use crate::signal::entity::RiskRule;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub identity: IdentityConfig,
    pub feeds: FeedConfig,
    pub signal: SignalConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub endpoint: String,
    pub project_id: String,
    // 服务端 API 版本，作为响应格式头发送
    pub api_version: String,
    pub database_id: String,
    pub profiles_collection_id: String,
    // 仅用于本地自签名证书的开发服务器
    pub self_signed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub alpha_vantage: AlphaVantageConfig,
    pub gold_api: GoldApiConfig,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaVantageConfig {
    pub base_url: String,
    pub api_key: String,
    pub function: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub pair: String,
    // 历史价格接口路径中的日期格式 (chrono strftime)
    pub date_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    // 尾部窗口长度：股票为样本数，黄金为日历天数
    pub window: usize,
    pub rules: Vec<RiskRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    // 为空时不写文件日志
    pub dir: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: "68c46de1003543ce190b".to_string(),
            api_version: "1.6.0".to_string(),
            database_id: "68c7e23d0028e08f405e".to_string(),
            profiles_collection_id: "Profiles".to_string(),
            self_signed: false,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            alpha_vantage: AlphaVantageConfig::default(),
            gold_api: GoldApiConfig::default(),
            timeout_secs: 10,
        }
    }
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.alphavantage.co".to_string(),
            api_key: String::new(),
            function: "TIME_SERIES_DAILY".to_string(),
            // S&P500 ETF 代理
            symbol: "SPY".to_string(),
        }
    }
}

impl Default for GoldApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.goldapi.io/api".to_string(),
            api_key: String::new(),
            pair: "XAU/USD".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            window: 30,
            rules: vec![RiskRule {
                kind: SignalKind::Equity,
                below: Decimal::new(-5, 0),
                points: 2,
            }],
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.identity.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(config.identity.profiles_collection_id, "Profiles");
        assert_eq!(config.feeds.alpha_vantage.symbol, "SPY");
        assert_eq!(config.feeds.gold_api.pair, "XAU/USD");
        assert_eq!(config.feeds.timeout_secs, 10);
        assert_eq!(config.signal.window, 30);
        assert_eq!(config.signal.rules.len(), 1);
        assert_eq!(config.signal.rules[0].kind, SignalKind::Equity);
        assert_eq!(config.signal.rules[0].below, dec!(-5));
        assert_eq!(config.signal.rules[0].points, 2);
        assert!(config.log.dir.is_none());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let json = r#"{
            "signal": { "window": 20, "rules": [{ "kind": "gold", "below": "-3.5", "points": 1 }] }
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.signal.window, 20);
        assert_eq!(config.signal.rules[0].kind, SignalKind::Gold);
        assert_eq!(config.signal.rules[0].below, dec!(-3.5));
        assert_eq!(config.feeds.alpha_vantage.function, "TIME_SERIES_DAILY");
    }
}
