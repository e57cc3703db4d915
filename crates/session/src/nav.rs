use ecopulse_core::identity::entity::SessionState;
use ecopulse_core::nav::{AuthScreen, NavTarget};
use tracing::debug;

/// # Summary
/// 导航所处的区域。
///
/// # Invariants
/// - 两个区域的栈都不为空。
/// - 进入已认证区域后，未认证页面无法通过返回操作到达。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavZone {
    Unauthenticated { stack: Vec<AuthScreen> },
    Authenticated { history: Vec<NavTarget> },
}

/// 当前展示的页面。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth(AuthScreen),
    Peer(NavTarget),
}

/// # Summary
/// 导航事件的处理结果。`Unhandled` 表示事件未改变任何状态，由调用方决定后续行为。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Navigated,
    Unhandled,
}

/// # Summary
/// 导航控制器，由外壳持有的唯一导航状态。页面本身不包含任何导航逻辑。
///
/// # Invariants
/// - 同级页面之间切换会清空历史，只保留目标页面。
/// - 在任何同级页面按返回都回到首页，历史重置为 `[Home]`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavController {
    zone: NavZone,
}

impl Default for NavController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavController {
    /// 初始位于注册页。
    pub fn new() -> Self {
        Self {
            zone: NavZone::Unauthenticated {
                stack: vec![AuthScreen::Registration],
            },
        }
    }

    pub fn zone(&self) -> &NavZone {
        &self.zone
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.zone, NavZone::Authenticated { .. })
    }

    /// 当前展示的页面 (各区域栈顶)。
    pub fn current(&self) -> Screen {
        match &self.zone {
            NavZone::Unauthenticated { stack } => Screen::Auth(
                stack.last().copied().unwrap_or(AuthScreen::Registration),
            ),
            NavZone::Authenticated { history } => {
                Screen::Peer(history.last().copied().unwrap_or(NavTarget::Home))
            }
        }
    }

    /// 已认证区域的历史，未认证时为空。
    pub fn history(&self) -> &[NavTarget] {
        match &self.zone {
            NavZone::Authenticated { history } => history,
            NavZone::Unauthenticated { .. } => &[],
        }
    }

    /// 进入已认证区域，落在首页且清空历史。
    pub fn enter_authenticated(&mut self) {
        debug!("Entering authenticated zone");
        self.zone = NavZone::Authenticated {
            history: vec![NavTarget::Home],
        };
    }

    /// # Summary
    /// 应用会话检查结果。
    ///
    /// # Returns
    /// `Active` 时进入首页并返回 `Navigated`，`Absent` 时不做改变。
    pub fn apply_session(&mut self, state: &SessionState) -> NavOutcome {
        match state {
            SessionState::Active(_) => {
                self.enter_authenticated();
                NavOutcome::Navigated
            }
            SessionState::Absent => NavOutcome::Unhandled,
        }
    }

    /// # Summary
    /// 底部导航选中某个同级页面。
    ///
    /// # Logic
    /// 1. 未认证区域不处理。
    /// 2. 目标即当前页面时不处理，历史保持不变。
    /// 3. 否则切换到目标页面，历史重置为 `[target]`。
    pub fn select(&mut self, target: NavTarget) -> NavOutcome {
        let NavZone::Authenticated { history } = &mut self.zone else {
            return NavOutcome::Unhandled;
        };
        if history.last() == Some(&target) {
            return NavOutcome::Unhandled;
        }
        debug!("Navigating to {}", target);
        history.clear();
        history.push(target);
        NavOutcome::Navigated
    }

    /// # Summary
    /// 处理返回事件。
    ///
    /// # Logic
    /// 1. 已认证区域：回到首页，历史重置为 `[Home]`。
    /// 2. 未认证区域：栈中多于一个页面时弹出栈顶，否则不处理。
    pub fn back(&mut self) -> NavOutcome {
        match &mut self.zone {
            NavZone::Authenticated { history } => {
                history.clear();
                history.push(NavTarget::Home);
                NavOutcome::Navigated
            }
            NavZone::Unauthenticated { stack } if stack.len() > 1 => {
                stack.pop();
                NavOutcome::Navigated
            }
            NavZone::Unauthenticated { .. } => NavOutcome::Unhandled,
        }
    }

    /// # Summary
    /// 在注册页与登录页之间跳转，压入目标页面。
    ///
    /// # Returns
    /// 已认证或目标已在栈顶时返回 `Unhandled`。
    pub fn open_auth(&mut self, screen: AuthScreen) -> NavOutcome {
        let NavZone::Unauthenticated { stack } = &mut self.zone else {
            return NavOutcome::Unhandled;
        };
        if stack.last() == Some(&screen) {
            return NavOutcome::Unhandled;
        }
        stack.push(screen);
        NavOutcome::Navigated
    }

    /// 注销后回到登录页，清空所有历史。
    pub fn logout_reset(&mut self) {
        debug!("Resetting navigation to login");
        self.zone = NavZone::Unauthenticated {
            stack: vec![AuthScreen::Login],
        };
    }
}
