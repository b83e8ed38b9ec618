use crate::ipc::error::HandlerErr;

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_optional_str<'a>(params: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

/// Leading integer of a form string: optional sign then digits, the rest
/// ignored. `"12.7"` reads as 12, `"abc"` as 0.
fn leading_integer(raw: &str) -> i64 {
    let t = raw.trim();
    let (sign, digits) = match t.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, t.strip_prefix('+').unwrap_or(t)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

/// Counter field as typed into a number box: numbers are truncated, strings
/// read their leading integer, anything non-numeric is 0. Negative values are
/// rejected.
pub fn get_counter(params: &serde_json::Value, key: &str) -> Result<u32, HandlerErr> {
    let Some(v) = params.get(key) else {
        return Err(HandlerErr::bad_params(format!("missing {}", key)));
    };
    let raw: i64 = match v {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => leading_integer(s),
        serde_json::Value::Null => 0,
        _ => {
            return Err(HandlerErr::bad_params(format!(
                "{} must be a number or string",
                key
            )))
        }
    };
    if raw < 0 {
        return Err(HandlerErr::bad_params(format!("{} must be >= 0", key)));
    }
    u32::try_from(raw).map_err(|_| HandlerErr::bad_params(format!("{} is out of range", key)))
}

pub fn get_optional_u32(params: &serde_json::Value, key: &str) -> Result<Option<u32>, HandlerErr> {
    match params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<u32>().ok()))
            .map(Some)
            .ok_or_else(|| HandlerErr::bad_params(format!("{} must be a non-negative integer", key))),
    }
}
