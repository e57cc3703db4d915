//! # 会话与导航
//!
//! 会话检查、注册登录流程、表单校验以及页面导航状态机。

pub mod auth;
pub mod form;
pub mod gate;
pub mod nav;
