use listing_common::{FilterState, ValueRange, DEFAULT_MAX_AREA, DEFAULT_MAX_PRICE};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// 房源列表配置 - 客户端可选传入，缺省字段使用默认值
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// 每页条数，也是"显示更多"每次增加的条数
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// 初始筛选条件
    #[serde(default)]
    pub default_filter: FilterState,
    /// 没有数据时的价格区间
    #[serde(default = "default_price_range")]
    pub price_range_default: ValueRange,
    /// 没有数据时的面积区间
    #[serde(default = "default_area_range")]
    pub area_range_default: ValueRange,
    /// 缓存条目上限，为空表示不限
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_filter: FilterState::default(),
            price_range_default: default_price_range(),
            area_range_default: default_area_range(),
            cache_capacity: None,
        }
    }
}

impl StoreConfig {
    /// 从 JSON 文本读取配置
    pub fn from_json(text: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(text)
            .map_err(|e| StoreError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(StoreError::Config("pageSize must be greater than 0".to_string()));
        }
        if self.cache_capacity == Some(0) {
            return Err(StoreError::Config("cacheCapacity must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// 默认每页条数
fn default_page_size() -> usize {
    20
}

/// 默认价格区间
fn default_price_range() -> ValueRange {
    ValueRange::new(0.0, DEFAULT_MAX_PRICE)
}

/// 默认面积区间
fn default_area_range() -> ValueRange {
    ValueRange::new(0.0, DEFAULT_MAX_AREA)
}
