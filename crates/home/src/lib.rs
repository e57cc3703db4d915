//! # 首页看板
//!
//! 衰退评分与各资产涨跌小部件的展示状态。

pub mod dashboard;
