//! Purpose: Field codecs for values the table API transmits as strings.
//! Exports: `bool_string`, `int_string` (for `#[serde(with = ...)]`).
//! Invariants: Encoding is canonical ("true"/"false", plain decimal).
//! Invariants: JSON null decodes to the type default; other mismatches fail.

/// Booleans carried as `"true"`/`"false"`.
pub mod bool_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(false);
        };
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid boolean string {raw:?}")))
    }

    fn parse(raw: &str) -> Option<bool> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
            _ => None,
        }
    }
}

/// Integers carried as decimal strings.
pub mod int_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(0);
        };
        raw.parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid integer string {raw:?}")))
    }
}
