//! Lottie animation detection.

use serde_json::Value;

/// Extension of zipped Lottie animations.
pub const LOTTIE_EXTENSION: &str = "lottie";

/// Check whether JSON text is a Lottie animation document.
///
/// A document qualifies when `v` is a string, `fr`, `w` and `h` are numbers
/// and `layers` is an array. Anything else, including text that is not JSON
/// at all, is not Lottie.
pub fn is_lottie_json(text: &str) -> bool {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => is_lottie_value(&value),
        Err(_) => false,
    }
}

/// Same check on an already parsed value.
pub fn is_lottie_value(value: &Value) -> bool {
    value.get("v").is_some_and(Value::is_string)
        && value.get("fr").is_some_and(Value::is_number)
        && value.get("w").is_some_and(Value::is_number)
        && value.get("h").is_some_and(Value::is_number)
        && value.get("layers").is_some_and(Value::is_array)
}
