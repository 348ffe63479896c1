use listing_common::{non_negative, parse_area_text, Apartment};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::error::{Result, StoreError};

/// 解析接口返回的房源数据
///
/// 输入必须是数组，否则返回 [`StoreError::Format`]。每个元素必须是对象，
/// 逐字段宽松转换为 [`Apartment`]；任何一条不是对象都会中止整个加载。
pub fn parse_apartment_data(data: &Value) -> Result<Vec<Apartment>> {
    let items = data
        .as_array()
        .ok_or_else(|| StoreError::Format("expected a list".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_apartment(index, item))
        .collect()
}

/// 从 JSON 文本解析房源数据
pub fn parse_apartment_json(text: &str) -> Result<Vec<Apartment>> {
    let data: Value = serde_json::from_str(text)
        .map_err(|e| StoreError::Format(format!("malformed JSON: {}", e)))?;
    parse_apartment_data(&data)
}

fn decode_apartment(index: usize, item: &Value) -> Result<Apartment> {
    let fields = item.as_object().ok_or_else(|| StoreError::Validation {
        index,
        reason: format!("expected an object, found {}", kind_of(item)),
    })?;

    Ok(coerce_fields(index, fields))
}

// 逐字段转换，缺失或无效的字段使用回退值
fn coerce_fields(index: usize, fields: &Map<String, Value>) -> Apartment {
    let field = |name: &str| fields.get(name).filter(|v| !v.is_null());

    Apartment {
        id: field("id").and_then(coerce_integer).unwrap_or(index as i64),
        description: coerce_text(field("description")),
        rooms: field("rooms").and_then(coerce_integer).unwrap_or(0),
        floor: coerce_text(field("floor")),
        area: field("area")
            .map(|v| parse_area_text(&area_text(v)))
            .unwrap_or(0.0),
        // 无穷大保留为有效价格
        price: non_negative(field("price").and_then(coerce_number).unwrap_or(0.0)),
        image: coerce_text(field("image")),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// 宽松的数字转换：数字、数字字符串和布尔值
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;

    if number.is_nan() {
        None
    } else {
        Some(number)
    }
}

/// 宽松的整数转换，小数向零截断
fn coerce_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }

    let number = coerce_number(value)?;
    if number.is_finite() {
        Some(number.trunc() as i64)
    } else {
        None
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn area_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(false) | Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}
