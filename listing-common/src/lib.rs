pub mod models;
pub mod numeric;

// 重新导出常用类型和函数，方便直接使用
pub use models::{Apartment, FilterState, SortField, SortKey, SortOrder, ValueRange, DEFAULT_MAX_AREA, DEFAULT_MAX_PRICE};
pub use numeric::{floor_number, non_negative, numeric_or_zero, parse_area_text};
