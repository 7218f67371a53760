//! Snowflake id helpers.
//!
//! The platform sends ids as decimal strings to avoid precision loss in
//! JSON clients. These helpers parse them and (de)serialize `u64` ids in
//! string form.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

use crate::error::{Error, Result};

/// Parse a snowflake id from its decimal string form.
pub fn parse_snowflake(input: &str, field: &'static str) -> Result<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_argument(field, "may not be empty"));
    }
    trimmed.parse::<u64>().map_err(|_| {
        Error::invalid_argument(field, format!("is not a valid snowflake: '{}'", input))
    })
}

struct SnowflakeVisitor;

impl Visitor<'_> for SnowflakeVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snowflake as a string or integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<u64, E> {
        u64::try_from(v).map_err(|_| E::custom(format!("negative snowflake: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<u64, E> {
        v.parse::<u64>()
            .map_err(|_| E::custom(format!("invalid snowflake: '{v}'")))
    }
}

/// Serialize a `u64` id as a string.
pub fn serialize<S: Serializer>(id: &u64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

/// Deserialize a `u64` id from a string or integer.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    deserializer.deserialize_any(SnowflakeVisitor)
}

/// Same as the parent module, for `Option<u64>` fields.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        id: &Option<u64>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match id {
            Some(id) => serializer.collect_str(id),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<u64>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "crate::utils::snowflake")] u64);

        let value: Option<Wrapper> = Option::deserialize(deserializer)?;
        Ok(value.map(|Wrapper(id)| id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(with = "crate::utils::snowflake")]
        id: u64,
        #[serde(default, with = "crate::utils::snowflake::option")]
        parent: Option<u64>,
    }

    #[test]
    fn test_parse_snowflake() {
        assert_eq!(parse_snowflake("245267426227388416", "ID").unwrap(), 245267426227388416);
        assert!(parse_snowflake("", "ID").is_err());
        assert!(parse_snowflake("abc", "ID").is_err());
        assert!(parse_snowflake("-1", "ID").is_err());
    }

    #[test]
    fn test_serde_string_form() {
        let holder: Holder = serde_json::from_str(r#"{"id":"42","parent":7}"#).unwrap();
        assert_eq!(holder, Holder { id: 42, parent: Some(7) });

        let json = serde_json::to_value(&holder).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["parent"], "7");
    }

    #[test]
    fn test_missing_option() {
        let holder: Holder = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(holder.parent, None);
    }
}
