//! Lenient field deserializers shared by the request DTOs.
//!
//! Bodies arrive either as JSON or as multipart form fields, where every
//! value is text. These helpers accept both representations.

use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

/// Trimmed string; blank values and `null` become `None`.
pub fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            Ok(if s.is_empty() { None } else { Some(s.to_string()) })
        }
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected a string, found {}", other))),
    }
}

/// Non-negative integer given as a JSON number or as numeric text.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{} is not a valid non-negative integer", n))),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<u32>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("'{}' is not a valid non-negative integer", s)))
        }
        Some(other) => Err(D::Error::custom(format!("expected a number, found {}", other))),
    }
}

/// A list of strings, also accepting a single string. Blank entries are dropped.
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => vec![Value::String(s)],
        Some(Value::Array(items)) => items,
        Some(other) => return Err(D::Error::custom(format!("expected a list of ids, found {}", other))),
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => {
                let s = s.trim();
                if !s.is_empty() {
                    out.push(s.to_string());
                }
            }
            other => return Err(D::Error::custom(format!("expected an id string, found {}", other))),
        }
    }
    Ok(Some(out))
}
