//! # 测试替身
//!
//! 供下游 crate 的集成测试使用的内存实现，通过 `test-utils` feature 开启。

use crate::common::Asset;
use crate::identity::entity::{
    Credentials, DocumentRef, NewAccount, NewDocument, Permission, User,
};
use crate::identity::error::AuthError;
use crate::identity::port::IdentityProvider;
use crate::market::entity::PriceSeries;
use crate::market::error::FetchError;
use crate::market::port::{PriceSeriesProvider, Sampling};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// # Summary
/// 已写入的文档记录。
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub reference: DocumentRef,
    pub data: serde_json::Value,
    pub permissions: Vec<Permission>,
}

/// # Summary
/// 基于内存的身份提供方，模拟账户、会话与文档库。
///
/// # Invariants
/// - 同一邮箱只能注册一次。
/// - 同一时刻最多一个会话。
/// - 每次接口调用都会计数，便于断言"未发起网络请求"。
pub struct MemoryIdentityProvider {
    // Key 为邮箱，Value 为 (用户, 密码)
    users: DashMap<String, (User, String)>,
    // Key 为文档 ID
    documents: DashMap<String, StoredDocument>,
    // 当前会话对应的用户 ID
    session: Mutex<Option<String>>,
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            documents: DashMap::new(),
            session: Mutex::new(None),
            calls: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
        }
    }

    /// 预置一个已登录用户。
    pub fn with_session(user: User, password: &str) -> Self {
        let provider = Self::new();
        let id = user.id.clone();
        provider
            .users
            .insert(user.email.clone(), (user, password.to_string()));
        *provider.lock_session() = Some(id);
        provider
    }

    /// 模拟网络不可达，之后所有调用返回 `AuthError::Network`。
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// 已发生的接口调用次数。
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn documents(&self) -> Vec<StoredDocument> {
        self.documents.iter().map(|d| d.value().clone()).collect()
    }

    pub fn has_session(&self) -> bool {
        self.lock_session().is_some()
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn enter(&self) -> Result<(), AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::Network("connection refused".into()));
        }
        Ok(())
    }
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn create_account(&self, account: &NewAccount) -> Result<User, AuthError> {
        self.enter()?;
        if self.users.contains_key(&account.email) {
            return Err(AuthError::Provider(
                "A user with the same id, email, or phone already exists in this project."
                    .into(),
            ));
        }
        let user = User {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name: account.name.clone(),
            email: account.email.clone(),
        };
        self.users.insert(
            account.email.clone(),
            (user.clone(), account.password.clone()),
        );
        Ok(user)
    }

    async fn create_session(&self, credentials: &Credentials) -> Result<(), AuthError> {
        self.enter()?;
        let user_id = match self.users.get(&credentials.email) {
            Some(entry) if entry.value().1 == credentials.password => entry.value().0.id.clone(),
            _ => {
                return Err(AuthError::Provider(
                    "Invalid credentials. Please check the email and password.".into(),
                ));
            }
        };
        let mut session = self.lock_session();
        if session.is_some() {
            return Err(AuthError::Provider(
                "Creation of a session is prohibited when a session is active.".into(),
            ));
        }
        *session = Some(user_id);
        Ok(())
    }

    async fn current_user(&self) -> Result<User, AuthError> {
        self.enter()?;
        let user_id = self
            .lock_session()
            .clone()
            .ok_or_else(|| AuthError::Provider("User (role: guests) missing scope (account)".into()))?;
        self.users
            .iter()
            .find(|entry| entry.value().0.id == user_id)
            .map(|entry| entry.value().0.clone())
            .ok_or_else(|| AuthError::Provider("User not found".into()))
    }

    async fn delete_session(&self, _session_id: &str) -> Result<(), AuthError> {
        self.enter()?;
        let mut session = self.lock_session();
        if session.take().is_none() {
            return Err(AuthError::Provider("Session not found".into()));
        }
        Ok(())
    }

    async fn create_document(&self, document: &NewDocument) -> Result<DocumentRef, AuthError> {
        self.enter()?;
        if self.lock_session().is_none() {
            return Err(AuthError::Provider(
                "The current user is not authorized to perform the requested action.".into(),
            ));
        }
        let reference = DocumentRef {
            id: uuid::Uuid::new_v4().simple().to_string(),
            collection_id: document.collection_id.clone(),
        };
        self.documents.insert(
            reference.id.clone(),
            StoredDocument {
                reference: reference.clone(),
                data: document.data.clone(),
                permissions: document.permissions.clone(),
            },
        );
        Ok(reference)
    }
}

/// # Summary
/// 返回预设结果的价格序列提供者。
pub struct StaticSeriesProvider {
    result: Result<PriceSeries, FetchError>,
    sampling: Sampling,
    calls: AtomicUsize,
}

impl StaticSeriesProvider {
    pub fn new(result: Result<PriceSeries, FetchError>, sampling: Sampling) -> Self {
        Self {
            result,
            sampling,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSeriesProvider for StaticSeriesProvider {
    async fn fetch(&self, _asset: &Asset, _window: usize) -> Result<PriceSeries, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn sampling(&self) -> Sampling {
        self.sampling
    }
}
