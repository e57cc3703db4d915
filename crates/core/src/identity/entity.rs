use serde::{Deserialize, Serialize};

/// # Summary
/// 身份提供方返回的用户实体。
///
/// # Invariants
/// - `id` 由身份提供方生成，全局唯一。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    // 用户唯一标识
    pub id: String,
    // 用户显示名称
    pub name: String,
    // 登录邮箱
    pub email: String,
}

/// # Summary
/// 会话状态。核心层只观察"存在 / 不存在"，从不解析令牌内容。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    // 存在有效会话，携带用户 ID
    Active(String),
    // 无会话或无法确认
    Absent,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }
}

/// # Summary
/// 注册新账户所需的资料。
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// # Summary
/// 邮箱密码凭据。
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// # Summary
/// 文档权限声明，序列化为身份提供方的权限字符串。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    Read(String),
    Update(String),
    Delete(String),
}

impl Permission {
    /// 为指定用户生成读、改、删三项权限。
    pub fn owner(user_id: &str) -> Vec<Permission> {
        vec![
            Permission::Read(user_id.to_string()),
            Permission::Update(user_id.to_string()),
            Permission::Delete(user_id.to_string()),
        ]
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Read(id) => write!(f, "read(\"user:{}\")", id),
            Permission::Update(id) => write!(f, "update(\"user:{}\")", id),
            Permission::Delete(id) => write!(f, "delete(\"user:{}\")", id),
        }
    }
}

/// # Summary
/// 待写入文档库的新文档。
#[derive(Debug, Clone)]
pub struct NewDocument {
    // 数据库 ID
    pub database_id: String,
    // 集合 ID (大小写敏感)
    pub collection_id: String,
    // 文档内容
    pub data: serde_json::Value,
    // 文档级权限
    pub permissions: Vec<Permission>,
}

/// # Summary
/// 文档库写入后的回执。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: String,
    pub collection_id: String,
}
