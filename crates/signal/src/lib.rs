//! # 市场信号计算
//!
//! 纯函数层：涨跌幅计算、风险评分与展示格式化，不做任何 I/O。

pub mod change;
pub mod format;
pub mod risk;
