use ecopulse_core::identity::entity::{Credentials, NewAccount};
use ecopulse_core::identity::error::{FormField, ValidationError};
use std::borrow::Cow;
use validator::{Validate, ValidationErrors};

/// # Summary
/// 注册表单的原始输入。
///
/// # Invariants
/// - 字段规则由 `validator` 声明，错误按字段声明顺序报告。
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RegistrationForm {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    // 身份提供方要求的最短长度，按字符计
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// # Summary
/// 登录表单的原始输入。
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct LoginForm {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

const REGISTRATION_ORDER: [(FormField, &str); 4] = [
    (FormField::Name, "name"),
    (FormField::Email, "email"),
    (FormField::Password, "password"),
    (FormField::ConfirmPassword, "confirm_password"),
];

const LOGIN_ORDER: [(FormField, &str); 2] =
    [(FormField::Email, "email"), (FormField::Password, "password")];

impl RegistrationForm {
    /// # Summary
    /// 按字段顺序校验注册表单，返回第一个失败的字段。
    ///
    /// # Logic
    /// 1. 名称非空 (仅含空白视为空)。
    /// 2. 邮箱非空且格式合法。
    /// 3. 密码至少 8 个字符。
    /// 4. 两次输入的密码一致。
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validate::validate(self).map_err(|errors| first_error(&errors, &REGISTRATION_ORDER))
    }

    pub fn to_account(&self) -> NewAccount {
        NewAccount {
            name: self.name.trim().to_string(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn to_credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl LoginForm {
    /// # Summary
    /// 校验登录表单：先邮箱格式，再密码非空。
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validate::validate(self).map_err(|errors| first_error(&errors, &LOGIN_ORDER))
    }

    pub fn to_credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message(Cow::Borrowed("Name is required")));
    }
    Ok(())
}

/// # Summary
/// 把 `validator` 的字段错误集合折叠为表单上第一个失败的字段。
///
/// # Logic
/// 1. 按表单字段顺序查找首个出错字段。
/// 2. 优先使用声明的提示文本，缺失时退回错误码。
fn first_error(errors: &ValidationErrors, order: &[(FormField, &str)]) -> ValidationError {
    let fields = errors.field_errors();
    for (field, key) in order {
        if let Some(err) = fields.get(*key).and_then(|errs| errs.first()) {
            let message = err
                .message
                .as_ref()
                .map_or_else(|| err.code.to_string(), |m| m.to_string());
            return ValidationError::new(*field, message);
        }
    }
    let field = order.first().map_or(FormField::Email, |(field, _)| *field);
    ValidationError::new(field, errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_accepted(email: &str) -> bool {
        LoginForm {
            email: email.to_string(),
            password: "secret".to_string(),
        }
        .validate()
        .is_ok()
    }

    #[test]
    fn test_email_check() {
        assert!(email_accepted("ada@example.com"));
        assert!(email_accepted("a.b+tag@mail.example.co"));
        assert!(!email_accepted(""));
        assert!(!email_accepted("ada"));
        assert!(!email_accepted("ada@"));
        assert!(!email_accepted("@example.com"));
        assert!(!email_accepted("ada@exa mple.com"));
        assert!(!email_accepted("ada@@example.com"));
        assert!(!email_accepted("ada@example..com"));
        assert!(!email_accepted("a@-.-"));
    }

    #[test]
    fn test_blank_name_rejected_before_email() {
        let form = RegistrationForm {
            name: " \t ".to_string(),
            ..RegistrationForm::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, FormField::Name);
        assert_eq!(err.message, "Name is required");
    }
}
