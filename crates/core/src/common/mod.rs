pub mod time;
pub mod tls;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 信号类别枚举，标识价格序列所代表的资产大类。
///
/// # Invariants
/// - 风险规则表按该类别匹配信号。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    // 股票指数 (例如: SPY)
    Equity,
    // 黄金现货
    Gold,
    // 加密资产 (预留，当前无数据源)
    Crypto,
}

impl FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equity" | "stock" | "stocks" => Ok(SignalKind::Equity),
            "gold" | "xau" => Ok(SignalKind::Gold),
            "crypto" | "btc" => Ok(SignalKind::Crypto),
            _ => Err(format!("Unknown SignalKind: {}", s)),
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Equity => write!(f, "equity"),
            SignalKind::Gold => write!(f, "gold"),
            SignalKind::Crypto => write!(f, "crypto"),
        }
    }
}

/// # Summary
/// 资产标的实体，代表一次价格序列请求的目标。
///
/// # Invariants
/// - `symbol` 必须是数据源可识别的代码 (例如: SPY, XAU/USD)。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    // 数据源中的标的代码
    pub symbol: String,
    // 资产大类
    pub kind: SignalKind,
}

impl Asset {
    pub fn new(symbol: impl Into<String>, kind: SignalKind) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_kind_parse_and_display() {
        assert_eq!("Stocks".parse::<SignalKind>(), Ok(SignalKind::Equity));
        assert_eq!("xau".parse::<SignalKind>(), Ok(SignalKind::Gold));
        assert!("bonds".parse::<SignalKind>().is_err());
        assert_eq!(SignalKind::Crypto.to_string(), "crypto");
    }
}
