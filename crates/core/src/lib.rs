//! # EcoPulse 核心领域层
//!
//! 仅包含实体、错误与端口 (Port) 定义，不依赖任何具体的网络或运行时实现。

pub mod common;
pub mod config;
pub mod identity;
pub mod market;
pub mod nav;
pub mod signal;

#[cfg(feature = "test-utils")]
pub mod testing;
