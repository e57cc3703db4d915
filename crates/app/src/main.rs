mod logging;
mod settings;
mod shell;

use ecopulse_core::common::time::RealTimeProvider;
use ecopulse_core::common::{Asset, SignalKind};
use ecopulse_core::identity::port::IdentityProvider;
use ecopulse_feed::alpha_vantage::AlphaVantageProvider;
use ecopulse_feed::gold_api::GoldApiProvider;
use ecopulse_home::dashboard::{HomeScreen, Widget};
use ecopulse_identity::appwrite::AppwriteClient;
use ecopulse_session::auth::AuthService;
use ecopulse_session::gate::SessionGate;
use ecopulse_signal::risk::RiskScorer;
use shell::{Command, Flow, Shell};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

/// 从命令行参数中取 `--config <path>`。
fn config_path() -> Result<Option<PathBuf>, String> {
    let mut args = std::env::args().skip(1);
    match (args.next().as_deref(), args.next()) {
        (None, _) => Ok(None),
        (Some("--config"), Some(path)) => Ok(Some(PathBuf::from(path))),
        (Some(other), _) => Err(format!("usage: ecopulse [--config <path>] (got '{}')", other)),
    }
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现并通过 Arc<dyn Trait> 注入到各服务。
///
/// # Logic
/// 1. 加载配置并初始化日志。
/// 2. 构造身份客户端，失败立即退出。
/// 3. 构造行情数据源与首页看板。
/// 4. 检查会话后进入交互循环，同时消费命令与看板加载结果。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 配置与日志
    let config = settings::load(config_path()?.as_deref())?;
    let _log_guard = logging::init(&config.log)?;
    info!("EcoPulse starting...");

    // 2. 身份客户端，进程内唯一
    let timeout = Duration::from_secs(config.feeds.timeout_secs);
    let identity: Arc<dyn IdentityProvider> =
        match AppwriteClient::new(&config.identity, timeout) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                error!("Failed to initialize identity client: {}", e);
                return Err(e.into());
            }
        };

    // 3. 行情数据源
    let clock = Arc::new(RealTimeProvider);
    let equity = AlphaVantageProvider::new(&config.feeds.alpha_vantage, timeout)?;
    let gold = GoldApiProvider::new(&config.feeds.gold_api, timeout, clock)?;
    let home = HomeScreen::new(
        vec![
            Widget::new(
                Asset::new(config.feeds.alpha_vantage.symbol.clone(), SignalKind::Equity),
                Arc::new(equity),
            ),
            Widget::new(
                Asset::new(config.feeds.gold_api.pair.clone(), SignalKind::Gold),
                Arc::new(gold),
            ),
        ],
        RiskScorer::new(config.signal.rules.clone()),
        config.signal.window,
    );

    // 4. 外壳
    let mut shell = Shell::new(
        SessionGate::new(identity.clone()),
        AuthService::new(identity, &config.identity),
        home,
    );
    print_lines(&shell.start().await);

    // 输入与看板结果并发到达，互不阻塞
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(msg) => {
                        println!("{}", msg);
                        continue;
                    }
                };
                let (flow, out) = shell.handle(command).await;
                print_lines(&out);
                if flow == Flow::Exit {
                    break;
                }
            }
            update = shell.next_update(), if shell.is_loading() => print_lines(&update),
        }
    }

    info!("Shutting down");
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
