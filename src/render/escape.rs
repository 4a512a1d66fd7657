//! Escapers for the non-HTML contexts of a page. HTML text and attributes are
//! escaped by askama itself.

use serde_json::Value;

/// Quote `value` as a JavaScript string literal that is safe inside `<script>`.
pub fn js_string(value: &str) -> String {
    script_safe(Value::String(value.to_owned()).to_string())
}

/// Percent-encode `value` for use as one query-string parameter value.
pub fn query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Pretty-print a JSON document for an inline `<script type="application/ld+json">`.
pub fn script_json(value: &Value) -> String {
    script_safe(format!("{value:#}"))
}

/// The numeric part of a free-form price (`"$1,299.00"` -> `"1299.00"`).
pub fn offer_price(price: &str) -> String {
    price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// JSON escapes quotes and control characters but leaves `<`, `>` and `&` alone,
/// which would let `</script>` or `<!--` end the element early.
fn script_safe(json: String) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}
