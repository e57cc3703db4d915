use thiserror::Error;

/// # Summary
/// 价格序列抓取错误枚举，处理网络、空响应及数据格式问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 可克隆，以便同一结果分发给多个展示切片。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    // 传输层失败或非 2xx 响应
    #[error("Network error: {0}")]
    Network(String),
    // 响应中没有任何数据条目
    #[error("Empty response")]
    Empty,
    // 价格或日期字段无法解析
    #[error("Malformed data: {0}")]
    Malformed(String),
}
