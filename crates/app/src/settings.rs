use config::{Config, ConfigError, Environment, File};
use ecopulse_core::config::AppConfig;
use std::collections::HashMap;
use std::path::Path;

/// 未指定 `--config` 时尝试读取的配置文件
pub const DEFAULT_CONFIG_PATH: &str = "config/ecopulse.toml";

/// 环境变量前缀，分隔符为双下划线，例如 `ECOPULSE__FEEDS__TIMEOUT_SECS`
pub const ENV_PREFIX: &str = "ECOPULSE";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 为底。
/// 2. 叠加配置文件：显式路径必须存在，默认路径可缺省。
/// 3. 叠加 `ECOPULSE__` 前缀的环境变量。
///
/// # Arguments
/// * `path`: 命令行指定的配置文件路径。
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_env(path, None)
}

/// # Summary
/// 与 `load` 相同，但可用给定映射代替进程环境变量。
pub fn load_with_env(
    path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(env),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecopulse_core::common::SignalKind;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::File::create(&path).unwrap();

        let config = load_with_env(Some(&path), Some(HashMap::new())).unwrap();
        assert_eq!(config.identity.project_id, "68c46de1003543ce190b");
        assert_eq!(config.signal.window, 30);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ecopulse.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[feeds]
timeout_secs = 3

[feeds.alpha_vantage]
api_key = "demo"
symbol = "VOO"

[signal]
window = 20

[[signal.rules]]
kind = "gold"
below = "-3"
points = 1

[log]
level = "debug"
dir = "/tmp/ecopulse-logs"
"#
        )
        .unwrap();

        let config = load_with_env(Some(&path), Some(HashMap::new())).unwrap();
        assert_eq!(config.feeds.timeout_secs, 3);
        assert_eq!(config.feeds.alpha_vantage.api_key, "demo");
        assert_eq!(config.feeds.alpha_vantage.symbol, "VOO");
        assert_eq!(config.feeds.alpha_vantage.function, "TIME_SERIES_DAILY");
        assert_eq!(config.signal.window, 20);
        assert_eq!(config.signal.rules.len(), 1);
        assert_eq!(config.signal.rules[0].kind, SignalKind::Gold);
        assert_eq!(config.signal.rules[0].below, dec!(-3));
        assert_eq!(config.log.dir.as_deref(), Some("/tmp/ecopulse-logs"));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ecopulse.toml");
        std::fs::write(&path, "[feeds.gold_api]\napi_key = \"from-file\"\n").unwrap();

        let env = HashMap::from([
            (
                "ECOPULSE__FEEDS__GOLD_API__API_KEY".to_string(),
                "from-env".to_string(),
            ),
            ("ECOPULSE__LOG__LEVEL".to_string(), "warn".to_string()),
        ]);
        let config = load_with_env(Some(&path), Some(env)).unwrap();
        assert_eq!(config.feeds.gold_api.api_key, "from-env");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(load_with_env(Some(&path), Some(HashMap::new())).is_err());
    }
}
