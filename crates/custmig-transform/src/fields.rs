//! Field-level conversion rules.
//!
//! These never fail: malformed input degrades to an empty or zero value so
//! that every row reaches validation, where rejections are reported per row.

/// Splits a full name on its first space into `(name, surname)`.
///
/// Surrounding whitespace is ignored. A value without a space yields an
/// empty surname.
pub fn split_name(raw: &str) -> (String, String) {
    let value = raw.trim();
    match value.split_once(' ') {
        Some((name, surname)) => (name.to_string(), surname.to_string()),
        None => (value.to_string(), String::new()),
    }
}

/// Converts an age cell to an integer.
///
/// Single and double quotes are removed first. The result is the leading
/// integer of what remains (optional sign, then digits, after leading
/// whitespace); anything without leading digits is 0. Values outside `i64`
/// saturate.
pub fn parse_age(raw: &str) -> i64 {
    let unquoted: String = raw.chars().filter(|c| !matches!(c, '\'' | '"')).collect();
    let mut chars = unquoted.trim_start().chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    let mut saw_digit = false;
    for ch in chars {
        let Some(digit) = ch.to_digit(10) else {
            break;
        };
        saw_digit = true;
        let digit = i64::from(digit);
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    if saw_digit { value } else { 0 }
}
