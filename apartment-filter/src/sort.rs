use listing_common::{floor_number, numeric_or_zero, Apartment, SortField, SortKey, SortOrder};
use std::cmp::Ordering;

/// 按排序键返回新的有序列表，不修改输入
///
/// 排序是稳定的：键相同的房源保持原有的相对顺序。未指定字段时原样复制。
pub fn sorted(list: &[Apartment], key: SortKey) -> Vec<Apartment> {
    let mut result = list.to_vec();

    if let Some(field) = key.field {
        result.sort_by(|a, b| compare_by(a, b, field, key.order));
    }

    result
}

/// 按字段比较两条房源，降序时反转结果
pub fn compare_by(a: &Apartment, b: &Apartment, field: SortField, order: SortOrder) -> Ordering {
    let ordering = match field {
        SortField::Floor => floor_number(&a.floor).cmp(&floor_number(&b.floor)),
        SortField::Price => compare_numbers(a.price, b.price),
        SortField::Area => compare_numbers(a.area, b.area),
        SortField::Rooms => a.rooms.cmp(&b.rooms),
        SortField::Description => compare_text(&a.description, &b.description),
    };

    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    numeric_or_zero(a)
        .partial_cmp(&numeric_or_zero(b))
        .unwrap_or(Ordering::Equal)
}

// 不区分大小写的文本比较
fn compare_text(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    locale_compare(&a, &b)
}

// 浏览器中使用宿主环境的 localeCompare
#[cfg(target_arch = "wasm32")]
fn locale_compare(a: &str, b: &str) -> Ordering {
    js_sys::JsString::from(a)
        .locale_compare(b, &js_sys::Array::new())
        .cmp(&0)
}

// 非浏览器目标没有区域设置规则，按 Unicode 码点比较：
// "é" 排在 "z" 之后，只有 wasm32 构建才按宿主的 localeCompare 排序
#[cfg(not(target_arch = "wasm32"))]
fn locale_compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}
