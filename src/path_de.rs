use serde::de::DeserializeOwned;

use crate::value::JsonValue;

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let mut de = serde_json::Deserializer::from_str(src);
    let value = serde_path_to_error::deserialize::<_, T>(&mut de).map_err(describe)?;
    de.end().map_err(|err| format!("trailing input → {err}"))?;
    Ok(value)
}

/// Parse one JSON document into the generic value tree.
pub fn parse_document(src: &str) -> Result<JsonValue, String> {
    from_str_with_path::<JsonValue>(src)
}

fn describe(err: serde_path_to_error::Error<serde_json::Error>) -> String {
    let path = err.path().to_string();
    format!("at JSON path {path} → {}", err.into_inner())
}
