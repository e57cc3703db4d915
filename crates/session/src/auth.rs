use crate::form::{LoginForm, RegistrationForm};
use ecopulse_core::config::IdentityConfig;
use ecopulse_core::identity::entity::{NewDocument, Permission, User};
use ecopulse_core::identity::error::{AuthError, ValidationError};
use ecopulse_core::identity::port::IdentityProvider;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// 注销时使用的会话 ID，表示当前会话
const CURRENT_SESSION: &str = "current";

/// # Summary
/// 注册 / 登录流程的统一错误类型。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFlowError {
    /// 表单校验失败，未发起任何请求
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    /// 身份提供方返回的错误
    #[error("{0}")]
    Provider(#[from] AuthError),
}

/// # Summary
/// 账户流程服务：注册、登录、注销。
///
/// # Invariants
/// - 表单校验先于任何提供方调用。
/// - 提供方错误只透出其消息文本。
pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    // 用户资料文档所在的数据库
    database_id: String,
    // 用户资料集合 (大小写敏感)
    profiles_collection_id: String,
}

impl AuthService {
    pub fn new(identity: Arc<dyn IdentityProvider>, config: &IdentityConfig) -> Self {
        Self {
            identity,
            database_id: config.database_id.clone(),
            profiles_collection_id: config.profiles_collection_id.clone(),
        }
    }

    /// # Summary
    /// 注册新用户并建立会话。
    ///
    /// # Logic
    /// 1. 校验表单，失败立即返回。
    /// 2. 创建账户 (ID 由提供方生成)。
    /// 3. 以同一凭据创建会话。
    /// 4. 在资料集合中写入 `{userId, name}`，权限仅限本人读改删。
    ///
    /// # Returns
    /// 新注册的用户。
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, AuthFlowError> {
        form.validate()?;

        let user = self.identity.create_account(&form.to_account()).await?;
        self.identity
            .create_session(&form.to_credentials())
            .await?;

        let profile = NewDocument {
            database_id: self.database_id.clone(),
            collection_id: self.profiles_collection_id.clone(),
            data: serde_json::json!({
                "userId": user.id,
                "name": user.name,
            }),
            permissions: Permission::owner(&user.id),
        };
        if let Err(e) = self.identity.create_document(&profile).await {
            warn!("Profile creation failed for {}: {}", user.id, e);
            return Err(e.into());
        }

        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// # Summary
    /// 邮箱密码登录。
    ///
    /// # Logic
    /// 1. 校验表单。
    /// 2. 创建会话。
    /// 3. 查询当前用户以确认会话生效。
    pub async fn login(&self, form: &LoginForm) -> Result<User, AuthFlowError> {
        form.validate()?;
        self.identity.create_session(&form.to_credentials()).await?;
        let user = self.identity.current_user().await?;
        info!("User {} logged in", user.id);
        Ok(user)
    }

    /// 删除当前会话。
    pub async fn logout(&self) -> Result<(), AuthFlowError> {
        self.identity.delete_session(CURRENT_SESSION).await?;
        info!("Logged out");
        Ok(())
    }
}
