use tracing::debug;

/// # Summary
/// 为 rustls 安装进程级的 ring 加密后端。
///
/// # Logic
/// 1. reqwest 以 `rustls-no-provider` 方式编译，首次建立 TLS 连接前必须有默认 Provider。
/// 2. 重复安装返回 Err，视为已安装并忽略。
///
/// # Returns
/// 无。
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}
