use thiserror::Error;

/// # Summary
/// 身份提供方错误枚举。
///
/// # Invariants
/// - 提供方错误视为不透明，仅保留可读消息。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 提供方返回的业务错误 (如用户已存在、凭据错误)
    #[error("{0}")]
    Provider(String),

    /// 网络连接或传输错误
    #[error("Network error: {0}")]
    Network(String),

    /// 客户端未能初始化，所有依赖操作快速失败
    #[error("Identity client not initialized: {0}")]
    NotInitialized(String),
}

/// # Summary
/// 表单字段标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::Name => write!(f, "name"),
            FormField::Email => write!(f, "email"),
            FormField::Password => write!(f, "password"),
            FormField::ConfirmPassword => write!(f, "confirm password"),
        }
    }
}

/// # Summary
/// 表单校验错误，在任何网络请求之前同步产生，按字段内联展示。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
