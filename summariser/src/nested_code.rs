use log::trace;
use serde_json::{Map, Value};

/// Find the application error code the node nested inside a raw error document.
///
/// The node wraps its HTTP response in the error, with the response body kept as a JSON encoded
/// string: `{"data": {"body": "{\"code\": 702, ...}"}}`. Nothing about that shape is guaranteed,
/// so every missing key, wrong type or unreadable body yields `None`.
pub fn extract_nested_code(raw_error: &Map<String, Value>) -> Option<i64> {
    let body = raw_error.get("data")?.get("body")?.as_str()?;

    let body: Value = match serde_json::from_str(body) {
        Ok(body) => body,
        Err(e) => {
            trace!("Skipping unreadable error body {body:?}: {e}");
            return None;
        }
    };

    code_from(body.get("code")?)
}

fn code_from(code: &Value) -> Option<i64> {
    if let Some(code) = code.as_i64() {
        return Some(code);
    }

    code.as_f64()
        .filter(|code| code.is_finite())
        .map(|code| code.trunc() as i64)
}
