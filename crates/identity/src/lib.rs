//! # 身份提供方客户端
//!
//! `IdentityProvider` 基于 Appwrite REST API 的实现。

pub mod appwrite;
