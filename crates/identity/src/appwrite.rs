use async_trait::async_trait;
use ecopulse_core::config::IdentityConfig;
use ecopulse_core::identity::entity::{
    Credentials, DocumentRef, NewAccount, NewDocument, User,
};
use ecopulse_core::identity::error::AuthError;
use ecopulse_core::identity::port::IdentityProvider;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// 让服务端生成唯一 ID 的占位值
const UNIQUE_ID: &str = "unique()";

/// # Summary
/// 基于 Appwrite REST API 的身份提供方客户端。
///
/// # Invariants
/// - 进程内只构造一次，之后以只读方式共享。
/// - 会话凭据保存在客户端的 cookie 存储中，从不被读取或解析。
pub struct AppwriteClient {
    /// 携带项目头与会话 cookie 的 HTTP 客户端
    client: Client,
    /// API 根地址，例如 `https://cloud.appwrite.io/v1`
    endpoint: String,
}

/// `POST /account` 请求体
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountBody<'a> {
    user_id: &'a str,
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

/// `POST /account/sessions/email` 请求体
#[derive(Serialize)]
struct EmailSessionBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// `POST /databases/{db}/collections/{col}/documents` 请求体
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentBody<'a> {
    document_id: &'a str,
    data: &'a serde_json::Value,
    permissions: Vec<String>,
}

#[derive(Deserialize)]
struct WireUser {
    #[serde(rename = "$id")]
    id: String,
    name: String,
    email: String,
}

#[derive(Deserialize)]
struct WireDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "$collectionId")]
    collection_id: String,
}

#[derive(Deserialize)]
struct WireError {
    message: String,
}

impl AppwriteClient {
    /// # Summary
    /// 创建一个新的 AppwriteClient 实例。
    ///
    /// # Logic
    /// 1. 拒绝空的服务地址或项目 ID。
    /// 2. 将项目头与响应格式头设为默认请求头。
    /// 3. 开启 cookie 存储，使会话在多次调用之间保持。
    ///
    /// # Arguments
    /// * `config`: 身份配置段。
    /// * `timeout`: 单次请求超时。
    ///
    /// # Returns
    /// 构建失败返回 `AuthError::NotInitialized`，调用方应据此快速失败。
    pub fn new(config: &IdentityConfig, timeout: Duration) -> Result<Self, AuthError> {
        if config.endpoint.trim().is_empty() {
            return Err(AuthError::NotInitialized("endpoint is empty".into()));
        }
        if config.project_id.trim().is_empty() {
            return Err(AuthError::NotInitialized("project id is empty".into()));
        }

        let header = |value: &str| {
            HeaderValue::from_str(value)
                .map_err(|e| AuthError::NotInitialized(format!("invalid header '{}': {}", value, e)))
        };
        let mut headers = HeaderMap::new();
        headers.insert("X-Appwrite-Project", header(&config.project_id)?);
        headers.insert("X-Appwrite-Response-Format", header(&config.api_version)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        ecopulse_core::common::tls::install_crypto_provider();
        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .danger_accept_invalid_certs(config.self_signed)
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::NotInitialized(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// # Summary
    /// 发送请求并解码 JSON 响应体。
    ///
    /// # Logic
    /// 1. 传输失败映射为 `AuthError::Network`。
    /// 2. 非 2xx 映射为携带服务端消息的 `AuthError::Provider`。
    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, AuthError> {
        let resp = req
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_body(status, &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| AuthError::Provider(format!("Unexpected response: {}", e)))
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<(), AuthError> {
        let resp = req
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(error_from_body(status, &body))
    }
}

/// # Summary
/// 将错误响应转换为只保留消息文本的提供方错误。
pub(crate) fn error_from_body(status: StatusCode, body: &str) -> AuthError {
    match serde_json::from_str::<WireError>(body) {
        Ok(err) => AuthError::Provider(err.message),
        Err(_) => AuthError::Provider(format!("HTTP {}", status)),
    }
}

impl From<WireUser> for User {
    fn from(w: WireUser) -> Self {
        User {
            id: w.id,
            name: w.name,
            email: w.email,
        }
    }
}

#[async_trait]
impl IdentityProvider for AppwriteClient {
    async fn create_account(&self, account: &NewAccount) -> Result<User, AuthError> {
        let body = CreateAccountBody {
            user_id: UNIQUE_ID,
            email: &account.email,
            password: &account.password,
            name: &account.name,
        };
        let user: WireUser = self
            .send_json(self.client.post(self.url("/account")).json(&body))
            .await?;
        debug!("Account created: {}", user.id);
        Ok(user.into())
    }

    async fn create_session(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let body = EmailSessionBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        self.send_empty(
            self.client
                .post(self.url("/account/sessions/email"))
                .json(&body),
        )
        .await
    }

    async fn current_user(&self) -> Result<User, AuthError> {
        let user: WireUser = self.send_json(self.client.get(self.url("/account"))).await?;
        Ok(user.into())
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), AuthError> {
        let path = format!("/account/sessions/{}", session_id);
        self.send_empty(self.client.delete(self.url(&path))).await
    }

    async fn create_document(&self, document: &NewDocument) -> Result<DocumentRef, AuthError> {
        let path = format!(
            "/databases/{}/collections/{}/documents",
            document.database_id, document.collection_id
        );
        let body = CreateDocumentBody {
            document_id: UNIQUE_ID,
            data: &document.data,
            permissions: document.permissions.iter().map(|p| p.to_string()).collect(),
        };
        let doc: WireDocument = self
            .send_json(self.client.post(self.url(&path)).json(&body))
            .await?;
        Ok(DocumentRef {
            id: doc.id,
            collection_id: doc.collection_id,
        })
    }
}
