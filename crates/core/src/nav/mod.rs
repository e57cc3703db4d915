use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 底部导航的五个同级页面，封闭集合。
///
/// # Invariants
/// - 任一时刻只有一个页面处于激活状态，且从不持久化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavTarget {
    Home,
    Trends,
    Insights,
    Alerts,
    Profile,
}

impl NavTarget {
    pub const ALL: [NavTarget; 5] = [
        NavTarget::Home,
        NavTarget::Trends,
        NavTarget::Insights,
        NavTarget::Alerts,
        NavTarget::Profile,
    ];

    /// 页面标题。
    pub fn title(self) -> &'static str {
        match self {
            NavTarget::Home => "EcoPulse",
            NavTarget::Trends => "Market Trends",
            NavTarget::Insights => "Market Insights",
            NavTarget::Alerts => "Market Alerts",
            NavTarget::Profile => "Your Profile",
        }
    }
}

impl FromStr for NavTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(NavTarget::Home),
            "trends" => Ok(NavTarget::Trends),
            "insights" => Ok(NavTarget::Insights),
            "alerts" => Ok(NavTarget::Alerts),
            "profile" => Ok(NavTarget::Profile),
            _ => Err(format!("Unknown screen: {}", s)),
        }
    }
}

impl std::fmt::Display for NavTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavTarget::Home => write!(f, "home"),
            NavTarget::Trends => write!(f, "trends"),
            NavTarget::Insights => write!(f, "insights"),
            NavTarget::Alerts => write!(f, "alerts"),
            NavTarget::Profile => write!(f, "profile"),
        }
    }
}

/// # Summary
/// 未认证区域内的页面。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthScreen {
    Registration,
    Login,
}

impl std::fmt::Display for AuthScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScreen::Registration => write!(f, "registration"),
            AuthScreen::Login => write!(f, "login"),
        }
    }
}
