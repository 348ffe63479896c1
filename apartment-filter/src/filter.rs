use listing_common::{Apartment, FilterState, SortField, SortKey, SortOrder};
use serde::{Serialize, Serializer};

use crate::error::{Result, StoreError};

/// 判断房源是否满足筛选条件
///
/// 价格和面积按闭区间比较；房间数集合为空时不限制。
pub fn matches_filter(apartment: &Apartment, filter: &FilterState) -> bool {
    apartment.price >= filter.min_price
        && apartment.price <= filter.max_price
        && apartment.area >= filter.area_min
        && apartment.area <= filter.area_max
        && (filter.rooms.is_empty() || filter.rooms.contains(&apartment.rooms))
}

/// 检查筛选条件能否参与计算，NaN 边界会让所有比较失效
pub fn validate_filter(filter: &FilterState) -> Result<()> {
    let bounds = [
        ("minPrice", filter.min_price),
        ("maxPrice", filter.max_price),
        ("areaMin", filter.area_min),
        ("areaMax", filter.area_max),
    ];

    match bounds.iter().find(|(_, value)| value.is_nan()) {
        Some((name, _)) => Err(StoreError::FilterComputation(format!("{} is not a number", name))),
        None => Ok(()),
    }
}

// 缓存键的组成部分，字段顺序决定序列化结果
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheKeyParts {
    #[serde(serialize_with = "serialize_bound")]
    min_price: f64,
    #[serde(serialize_with = "serialize_bound")]
    max_price: f64,
    #[serde(serialize_with = "serialize_bound")]
    area_min: f64,
    #[serde(serialize_with = "serialize_bound")]
    area_max: f64,
    rooms: Vec<i64>,
    sort_field: Option<SortField>,
    sort_order: SortOrder,
}

// JSON 数字无法表示非有限值，serde_json 会把它们统一写成 null
fn serialize_bound<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}

/// 生成筛选条件和排序键的缓存键
///
/// 房间数按数值升序排列，因此集合顺序不同的等价条件得到相同的键。
pub fn cache_key(filter: &FilterState, sort: SortKey) -> Result<String> {
    let mut rooms = filter.rooms.clone();
    rooms.sort_unstable();

    let parts = CacheKeyParts {
        min_price: filter.min_price,
        max_price: filter.max_price,
        area_min: filter.area_min,
        area_max: filter.area_max,
        rooms,
        sort_field: sort.field,
        sort_order: sort.order,
    };

    serde_json::to_string(&parts)
        .map_err(|e| StoreError::FilterComputation(format!("failed to build cache key: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apartment(price: f64, area: f64, rooms: i64) -> Apartment {
        Apartment {
            id: 0,
            description: String::new(),
            rooms,
            floor: String::new(),
            area,
            price,
            image: String::new(),
        }
    }

    fn filter(min_price: f64, max_price: f64, area_min: f64, area_max: f64, rooms: Vec<i64>) -> FilterState {
        FilterState {
            min_price,
            max_price,
            area_min,
            area_max,
            rooms,
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let f = filter(100.0, 200.0, 50.0, 70.0, vec![]);

        assert!(matches_filter(&apartment(100.0, 50.0, 1), &f));
        assert!(matches_filter(&apartment(200.0, 70.0, 5), &f));
        assert!(!matches_filter(&apartment(99.99, 60.0, 1), &f));
        assert!(!matches_filter(&apartment(150.0, 70.01, 1), &f));
    }

    #[test]
    fn room_set_restricts_only_when_non_empty() {
        let any_rooms = FilterState::default();
        let two_or_three = filter(0.0, 1e9, 0.0, 1e9, vec![2, 3]);

        assert!(matches_filter(&apartment(10.0, 10.0, 7), &any_rooms));
        assert!(matches_filter(&apartment(10.0, 10.0, 3), &two_or_three));
        assert!(!matches_filter(&apartment(10.0, 10.0, 1), &two_or_three));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let f = filter(500.0, 100.0, 0.0, 200.0, vec![]);
        assert!(!matches_filter(&apartment(300.0, 10.0, 1), &f));
        assert!(validate_filter(&f).is_ok());
    }

    #[test]
    fn nan_bound_is_rejected() {
        let f = filter(0.0, f64::NAN, 0.0, 200.0, vec![]);
        assert_eq!(
            validate_filter(&f),
            Err(StoreError::FilterComputation("maxPrice is not a number".to_string()))
        );
    }

    #[test]
    fn cache_key_ignores_room_order() {
        let sort = SortKey::new(SortField::Price, SortOrder::Asc);
        let a = cache_key(&filter(0.0, 10.0, 0.0, 5.0, vec![3, 1, 2]), sort).unwrap();
        let b = cache_key(&filter(0.0, 10.0, 0.0, 5.0, vec![1, 2, 3]), sort).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_sorts_rooms_numerically() {
        let key = cache_key(&filter(0.0, 10.0, 0.0, 5.0, vec![10, 2]), SortKey::default()).unwrap();
        assert_eq!(
            key,
            r#"{"minPrice":0.0,"maxPrice":10.0,"areaMin":0.0,"areaMax":5.0,"rooms":[2,10],"sortField":null,"sortOrder":"asc"}"#
        );
    }

    #[test]
    fn cache_key_keeps_infinite_bounds_apart() {
        let sort = SortKey::default();
        let open = cache_key(&filter(0.0, f64::INFINITY, 0.0, 5.0, vec![]), sort).unwrap();
        let closed = cache_key(&filter(0.0, f64::NEG_INFINITY, 0.0, 5.0, vec![]), sort).unwrap();

        assert_ne!(open, closed);
        assert!(open.contains(r#""maxPrice":"Infinity""#));
        assert!(closed.contains(r#""maxPrice":"-Infinity""#));
    }

    #[test]
    fn cache_key_depends_on_sort() {
        let f = FilterState::default();
        let asc = cache_key(&f, SortKey::new(SortField::Area, SortOrder::Asc)).unwrap();
        let desc = cache_key(&f, SortKey::new(SortField::Area, SortOrder::Desc)).unwrap();
        let unsorted = cache_key(&f, SortKey::default()).unwrap();
        assert_ne!(asc, desc);
        assert_ne!(asc, unsorted);
    }
}
