use once_cell::sync::Lazy;
use regex::Regex;

/// 楼层文本中第一段连续数字
static FLOOR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid floor pattern"));

/// 解析面积文本
///
/// 去掉所有空白字符，把第一个小数逗号替换为小数点后转换为数字。
/// 结果不是有限正数时（NaN、负数、0、无穷大）一律视为 0。
pub fn parse_area_text(raw: &str) -> f64 {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = compact.replacen(',', ".", 1);

    // 空字符串在数值转换中等同于 0
    if normalized.is_empty() {
        return 0.0;
    }

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// 提取楼层文本中的第一个数字，例如 "2 of 9" -> 2；没有数字时返回 0
pub fn floor_number(floor: &str) -> u64 {
    FLOOR_DIGITS
        .find(floor)
        // 只有溢出会失败，超长数字按最大值排在最后
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// 把数值限制为非负，NaN 视为 0
pub fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// 比较用的数值，NaN 视为 0
pub fn numeric_or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_accepts_decimal_comma() {
        assert_eq!(parse_area_text("45,5"), 45.5);
        assert_eq!(parse_area_text(" 1 2 0 , 25 "), 120.25);
        assert_eq!(parse_area_text("60"), 60.0);
    }

    #[test]
    fn area_rejects_invalid_and_non_positive() {
        assert_eq!(parse_area_text("abc"), 0.0);
        assert_eq!(parse_area_text("-5"), 0.0);
        assert_eq!(parse_area_text("0"), 0.0);
        assert_eq!(parse_area_text(""), 0.0);
        assert_eq!(parse_area_text("inf"), 0.0);
        // 只替换第一个逗号
        assert_eq!(parse_area_text("1,2,3"), 0.0);
    }

    #[test]
    fn floor_takes_first_number() {
        assert_eq!(floor_number("2 of 9"), 2);
        assert_eq!(floor_number("10 of 12"), 10);
        assert_eq!(floor_number("этаж 7 из 9"), 7);
        assert_eq!(floor_number("ground"), 0);
        assert_eq!(floor_number(""), 0);
    }

    #[test]
    fn non_negative_clamps() {
        assert_eq!(non_negative(-1.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(12.5), 12.5);
        assert_eq!(numeric_or_zero(f64::NAN), 0.0);
        assert_eq!(numeric_or_zero(-3.0), -3.0);
    }
}
