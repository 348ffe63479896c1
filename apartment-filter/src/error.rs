use thiserror::Error;

/// 加载失败时展示给用户的提示
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load apartments. Please try again later.";

/// 筛选失败时展示给用户的提示
pub const FILTER_ERROR_MESSAGE: &str = "Error applying filters. Please try again.";

/// 房源列表操作中可能出现的错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// 数据整体格式错误，例如不是数组
    #[error("invalid data format: {0}")]
    Format(String),

    /// 单条房源数据无法解码
    #[error("invalid apartment data at index {index}: {reason}")]
    Validation { index: usize, reason: String },

    /// 筛选或排序过程中的意外错误
    #[error("filter computation failed: {0}")]
    FilterComputation(String),

    /// 无法识别的排序字段或方向
    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),

    /// 配置无效
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
