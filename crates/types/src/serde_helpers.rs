//! Field adapters for JSON produced by query layers and protocol configs.

use serde::{Deserialize, Deserializer};

/// Deserializes a `u64` given either as a JSON number or a decimal string.
///
/// Use with `#[serde(deserialize_with = "...")]`.
pub fn u64_from_number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}
