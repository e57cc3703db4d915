use ecopulse_core::nav::{AuthScreen, NavTarget};
use ecopulse_home::dashboard::{HomeScreen, SliceState};
use ecopulse_session::auth::AuthService;
use ecopulse_session::form::{LoginForm, RegistrationForm};
use ecopulse_session::gate::SessionGate;
use ecopulse_session::nav::{NavController, NavOutcome, Screen};
use std::str::FromStr;
use tracing::{error, info};

pub const HELP: &str = "\
commands:
  register <name> <email> <password> <confirm>
  login <email> <password>
  open <login|register>
  tab <home|trends|insights|alerts|profile>
  back
  refresh
  logout
  help
  quit";

/// 外壳可识别的输入命令。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register(RegistrationForm),
    Login(LoginForm),
    Open(AuthScreen),
    Tab(NavTarget),
    Back,
    Refresh,
    Logout,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["register", name, email, password, confirm] => {
                Ok(Command::Register(RegistrationForm {
                    name: (*name).to_string(),
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                    confirm_password: (*confirm).to_string(),
                }))
            }
            ["login", email, password] => Ok(Command::Login(LoginForm {
                email: (*email).to_string(),
                password: (*password).to_string(),
            })),
            ["open", "login"] => Ok(Command::Open(AuthScreen::Login)),
            ["open", "register"] => Ok(Command::Open(AuthScreen::Registration)),
            ["tab", screen] => screen.parse().map(Command::Tab),
            ["back"] => Ok(Command::Back),
            ["refresh"] => Ok(Command::Refresh),
            ["logout"] => Ok(Command::Logout),
            ["help"] => Ok(Command::Help),
            ["quit"] | ["exit"] => Ok(Command::Quit),
            _ => Err(format!("Unknown command: {}", line.trim())),
        }
    }
}

/// 命令处理后外壳的去向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// # Summary
/// 交互外壳，持有导航控制器与各页面，把输入事件委派给它们。
///
/// # Invariants
/// - 导航状态只由 `NavController` 维护。
/// - 命令处理从不等待行情抓取，结果经 `next_update` 到达后再渲染。
/// - 首页离开视图时中止其后台加载。
pub struct Shell {
    nav: NavController,
    gate: SessionGate,
    auth: AuthService,
    home: HomeScreen,
}

impl Shell {
    pub fn new(gate: SessionGate, auth: AuthService, home: HomeScreen) -> Self {
        Self {
            nav: NavController::new(),
            gate,
            auth,
            home,
        }
    }

    #[cfg(test)]
    pub fn nav(&self) -> &NavController {
        &self.nav
    }

    /// # Summary
    /// 启动时检查会话。
    ///
    /// # Logic
    /// 1. 查询会话状态。
    /// 2. 有会话直接进入首页并发起看板加载，否则停在注册页。
    pub async fn start(&mut self) -> Vec<String> {
        let state = self.gate.check_session().await;
        if self.nav.apply_session(&state) == NavOutcome::Navigated {
            info!("Resuming existing session");
            self.home.load();
        }
        self.render()
    }

    /// 首页是否还有未回传的加载结果。
    pub fn is_loading(&self) -> bool {
        self.home.is_loading()
    }

    /// # Summary
    /// 等待首页的下一个加载结果并写入视图。
    ///
    /// # Returns
    /// 仍停留在首页时返回重新渲染的文本，否则为空。
    pub async fn next_update(&mut self) -> Vec<String> {
        if !self.home.next_event().await {
            return Vec::new();
        }
        if self.nav.current() == Screen::Peer(NavTarget::Home) {
            self.render_home()
        } else {
            Vec::new()
        }
    }

    /// # Summary
    /// 处理一条命令并返回要显示的文本。
    pub async fn handle(&mut self, command: Command) -> (Flow, Vec<String>) {
        let mut out = Vec::new();
        match command {
            Command::Help => out.push(HELP.to_string()),
            Command::Quit => return (Flow::Exit, out),
            Command::Register(form) => {
                if self.nav.is_authenticated() {
                    out.push("Already signed in".to_string());
                    return (Flow::Continue, out);
                }
                match self.auth.register(&form).await {
                    Ok(_) => {
                        out.push("Registration successful!".to_string());
                        self.enter_home();
                    }
                    Err(e) => out.push(format!("Registration failed: {}", e)),
                }
            }
            Command::Login(form) => {
                if self.nav.is_authenticated() {
                    out.push("Already signed in".to_string());
                    return (Flow::Continue, out);
                }
                match self.auth.login(&form).await {
                    Ok(_) => {
                        out.push("Login successful!".to_string());
                        self.enter_home();
                    }
                    Err(e) => out.push(format!("Login failed: {}", e)),
                }
            }
            Command::Logout => {
                if !self.nav.is_authenticated() {
                    out.push("Not signed in".to_string());
                    return (Flow::Continue, out);
                }
                match self.auth.logout().await {
                    Ok(()) => {
                        self.home.cancel();
                        self.nav.logout_reset();
                    }
                    Err(e) => {
                        error!("Failed to logout: {}", e);
                        out.push(format!("Logout failed: {}", e));
                    }
                }
            }
            Command::Open(screen) => {
                if self.nav.open_auth(screen) == NavOutcome::Unhandled {
                    return (Flow::Continue, out);
                }
            }
            Command::Tab(target) => {
                if self.nav.select(target) == NavOutcome::Unhandled {
                    return (Flow::Continue, out);
                }
                self.on_screen_changed();
            }
            Command::Back => match self.nav.back() {
                NavOutcome::Navigated => self.on_screen_changed(),
                // 根页面上返回即退出
                NavOutcome::Unhandled => return (Flow::Exit, out),
            },
            Command::Refresh => {
                if self.nav.current() == Screen::Peer(NavTarget::Home) {
                    self.home.load();
                }
            }
        }
        out.extend(self.render());
        (Flow::Continue, out)
    }

    fn enter_home(&mut self) {
        self.nav.enter_authenticated();
        self.home.load();
    }

    fn on_screen_changed(&mut self) {
        if self.nav.current() == Screen::Peer(NavTarget::Home) {
            self.home.load();
        } else {
            self.home.cancel();
        }
    }

    /// 渲染当前页面。
    pub fn render(&mut self) -> Vec<String> {
        match self.nav.current() {
            Screen::Auth(AuthScreen::Registration) => vec![
                "== Create account ==".to_string(),
                "register <name> <email> <password> <confirm>, or `open login`".to_string(),
            ],
            Screen::Auth(AuthScreen::Login) => vec![
                "== Sign in ==".to_string(),
                "login <email> <password>, or `open register`".to_string(),
            ],
            Screen::Peer(NavTarget::Home) => self.render_home(),
            Screen::Peer(target) => vec![format!("== {} ==", target.title())],
        }
    }

    fn render_home(&mut self) -> Vec<String> {
        self.home.pump();
        let mut out = vec![format!("== {} ==", NavTarget::Home.title())];

        let view = self.home.view();
        match &view.recession {
            Some(assessment) => out.push(format!(
                "Recession risk: {} (score {})",
                assessment.category.label(),
                assessment.score
            )),
            None => out.push("Recession risk: --".to_string()),
        }
        out.push(format!("S&P 500: {}", slice_text(&view.equity)));
        out.push(format!("Gold:    {}", slice_text(&view.gold)));

        out.extend(self.home.take_notices().into_iter().map(|n| format!("! {}", n)));
        out
    }
}

fn slice_text(slice: &SliceState) -> &str {
    match slice {
        SliceState::Loading => "loading...",
        SliceState::Ready { label, .. } => label,
        SliceState::Failed => "--",
    }
}
