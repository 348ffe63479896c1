use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 默认价格上限
pub const DEFAULT_MAX_PRICE: f64 = 20_000_000.0;

/// 默认面积上限
pub const DEFAULT_MAX_AREA: f64 = 200.0;

/// 房源记录 - 列表展示所需的全部信息
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Apartment {
    /// 房源唯一标识符
    pub id: i64,
    /// 房源描述
    pub description: String,
    /// 房间数
    pub rooms: i64,
    /// 楼层描述，例如 "2 of 5"
    pub floor: String,
    /// 面积，无效时为 0
    pub area: f64,
    /// 价格，不小于 0
    pub price: f64,
    /// 图片地址
    pub image: String,
}

/// 排序字段
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Price,
    Area,
    Rooms,
    Floor,
    Description,
}

impl SortField {
    /// 字段在 JS 侧使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Area => "area",
            SortField::Rooms => "rooms",
            SortField::Floor => "floor",
            SortField::Description => "description",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortField::Price),
            "area" => Ok(SortField::Area),
            "rooms" => Ok(SortField::Rooms),
            "floor" => Ok(SortField::Floor),
            "description" => Ok(SortField::Description),
            other => Err(format!("未知的排序字段: {}", other)),
        }
    }
}

/// 排序方向
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("未知的排序方向: {}", other)),
        }
    }
}

/// 排序键 - 字段为空时保持原有顺序
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SortKey {
    pub field: Option<SortField>,
    pub order: SortOrder,
}

impl SortKey {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self {
            field: Some(field),
            order,
        }
    }
}

/// 筛选条件 - 每次应用时整体替换
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// 最低价格（含）
    pub min_price: f64,
    /// 最高价格（含）
    pub max_price: f64,
    /// 最小面积（含）
    pub area_min: f64,
    /// 最大面积（含）
    pub area_max: f64,
    /// 可接受的房间数，为空表示不限
    pub rooms: Vec<i64>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: DEFAULT_MAX_PRICE,
            area_min: 0.0,
            area_max: DEFAULT_MAX_AREA,
            rooms: Vec::new(),
        }
    }
}

/// 数值区间 - 用于价格和面积范围控件
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 计算一组数值的区间，下限不低于 0；没有数值时返回 None
    pub fn spanning<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter();
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));

        Some(Self {
            min: min.max(0.0),
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_state_uses_camel_case_keys() {
        let filter: FilterState = serde_json::from_str(
            r#"{"minPrice":100,"maxPrice":180,"areaMin":0,"areaMax":100,"rooms":[2]}"#,
        )
        .unwrap();

        assert_eq!(filter.min_price, 100.0);
        assert_eq!(filter.max_price, 180.0);
        assert_eq!(filter.area_max, 100.0);
        assert_eq!(filter.rooms, vec![2]);
    }

    #[test]
    fn missing_filter_fields_take_defaults() {
        let filter: FilterState = serde_json::from_str(r#"{"rooms":[1,3]}"#).unwrap();

        assert_eq!(filter.max_price, DEFAULT_MAX_PRICE);
        assert_eq!(filter.area_max, DEFAULT_MAX_AREA);
        assert_eq!(filter.rooms, vec![1, 3]);
    }

    #[test]
    fn sort_names_round_trip_through_strings() {
        for field in [
            SortField::Price,
            SortField::Area,
            SortField::Rooms,
            SortField::Floor,
            SortField::Description,
        ] {
            assert_eq!(field.as_str().parse::<SortField>(), Ok(field));
        }
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
        assert!("PRICE".parse::<SortField>().is_err());
    }

    #[test]
    fn spanning_clamps_lower_bound() {
        let range = ValueRange::spanning([-3.0, 10.0, 4.0]).unwrap();
        assert_eq!(range, ValueRange::new(0.0, 10.0));
        assert_eq!(ValueRange::spanning(Vec::new()), None);
    }
}
