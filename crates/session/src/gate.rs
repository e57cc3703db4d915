use ecopulse_core::identity::entity::SessionState;
use ecopulse_core::identity::error::AuthError;
use ecopulse_core::identity::port::IdentityProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// # Summary
/// 会话闸门，在启动时判断是否已有有效会话。
///
/// # Invariants
/// - 无法确认会话时一律视为 `Absent`，回到未认证流程。
/// - 不缓存结果，以最后一次检查为准。
pub struct SessionGate {
    identity: Arc<dyn IdentityProvider>,
}

impl SessionGate {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// # Summary
    /// 通过一次 `current_user` 请求检查会话。
    ///
    /// # Logic
    /// 1. 查询当前用户。
    /// 2. 成功返回 `Active(user_id)`。
    /// 3. 任何错误返回 `Absent`：未登录为常态记 debug，其余记 warn。
    pub async fn check_session(&self) -> SessionState {
        match self.identity.current_user().await {
            Ok(user) => {
                debug!("Active session for user {}", user.id);
                SessionState::Active(user.id)
            }
            Err(AuthError::Provider(msg)) => {
                debug!("No active session: {}", msg);
                SessionState::Absent
            }
            Err(e) => {
                warn!("Session check failed, treating as absent: {}", e);
                SessionState::Absent
            }
        }
    }
}
