use crate::identity::entity::{Credentials, DocumentRef, NewAccount, NewDocument, User};
use crate::identity::error::AuthError;
use async_trait::async_trait;

/// # Summary
/// 身份 / 文档存储的能力式客户端接口 (Port)。
///
/// # Invariants
/// - 进程内只构造一次，之后以只读方式共享。
/// - 所有方法都是异步的，失败时返回携带可读消息的 `AuthError`。
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// # Summary
    /// 创建新账户，用户 ID 由提供方生成。
    ///
    /// # Arguments
    /// * `account`: 注册资料。
    ///
    /// # Returns
    /// 新建的用户实体。
    async fn create_account(&self, account: &NewAccount) -> Result<User, AuthError>;

    /// # Summary
    /// 使用邮箱密码创建会话。会话由提供方不透明地持有。
    async fn create_session(&self, credentials: &Credentials) -> Result<(), AuthError>;

    /// # Summary
    /// 查询当前会话对应的用户。
    ///
    /// # Returns
    /// 有会话返回用户，无会话时返回 `AuthError`。
    async fn current_user(&self) -> Result<User, AuthError>;

    /// # Summary
    /// 删除会话。`session_id` 为 `"current"` 时删除当前会话。
    async fn delete_session(&self, session_id: &str) -> Result<(), AuthError>;

    /// # Summary
    /// 在文档库中创建文档，文档 ID 由提供方生成。
    async fn create_document(&self, document: &NewDocument) -> Result<DocumentRef, AuthError>;
}
