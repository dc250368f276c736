use serde::de::{Deserialize, Deserializer};
use serde_json::Value;

/// Set `deserialize_with` to this fn to get the default if null.
/// See <https://github.com/serde-rs/serde/issues/1098#issuecomment-760711617>
pub(crate) fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Servers disagree on whether paging counters are strings or numbers, so
/// accept both and keep the textual form. Empty strings become `None`.
pub(crate) fn deserialize_lenient_string<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
