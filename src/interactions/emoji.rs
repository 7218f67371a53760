//! Emoji references attached to components.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::checks;
use crate::error::Result;

/// An emoji shown on a component.
///
/// Either a unicode emoji (name only) or a custom guild emoji (name, id and
/// animation flag). The value is opaque to the components that carry it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Emoji {
    #[serde(default, deserialize_with = "null_as_empty")]
    name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::snowflake::option"
    )]
    id: Option<u64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    animated: bool,
}

/// Custom emoji can arrive with `"name": null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Emoji {
    /// Create a unicode emoji, e.g. `"👍"`.
    pub fn from_unicode(code: impl Into<String>) -> Result<Self> {
        let name = code.into();
        checks::not_blank(&name, "Emoji")?;
        Ok(Self {
            name,
            id: None,
            animated: false,
        })
    }

    /// Create a custom emoji reference.
    pub fn from_custom(name: impl Into<String>, id: u64, animated: bool) -> Result<Self> {
        let name = name.into();
        checks::not_empty(&name, "Emoji name")?;
        Ok(Self {
            name,
            id: Some(id),
            animated,
        })
    }

    /// Parse the markdown form of an emoji.
    ///
    /// Accepts `<:name:id>` and `<a:name:id>` for custom emoji. Anything
    /// else is taken as a unicode emoji.
    pub fn from_markdown(code: &str) -> Result<Self> {
        let code = code.trim();
        if let Some(inner) = code.strip_prefix('<').and_then(|c| c.strip_suffix('>')) {
            let parts: Vec<&str> = inner.split(':').collect();
            if let [prefix, name, id] = parts.as_slice() {
                if *prefix == "a" || prefix.is_empty() {
                    let id = crate::utils::parse_snowflake(id, "Emoji id")?;
                    return Self::from_custom(*name, id, *prefix == "a");
                }
            }
        }
        Self::from_unicode(code)
    }

    /// Emoji name, or the unicode sequence for unicode emoji.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of a custom emoji.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn is_custom(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_unicode(&self) -> bool {
        self.id.is_none()
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) if self.animated => write!(f, "<a:{}:{}>", self.name, id),
            Some(id) => write!(f, "<:{}:{}>", self.name, id),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_markdown_custom() {
        let emoji = Emoji::from_markdown("<:minn:245267426227388416>").unwrap();
        assert!(emoji.is_custom());
        assert_eq!(emoji.name(), "minn");
        assert_eq!(emoji.id(), Some(245267426227388416));
        assert!(!emoji.is_animated());
        assert_eq!(emoji.to_string(), "<:minn:245267426227388416>");
    }

    #[test]
    fn test_from_markdown_animated() {
        let emoji = Emoji::from_markdown("<a:party:849286315580719104>").unwrap();
        assert!(emoji.is_animated());
        assert_eq!(emoji.to_string(), "<a:party:849286315580719104>");
    }

    #[test]
    fn test_from_markdown_unicode() {
        let emoji = Emoji::from_markdown("👍").unwrap();
        assert!(emoji.is_unicode());
        assert_eq!(emoji.name(), "👍");
        assert!(Emoji::from_markdown("   ").is_err());
    }

    #[test]
    fn test_from_markdown_bad_id() {
        let err = Emoji::from_markdown("<:minn:notanid>").unwrap_err();
        assert_eq!(err.field(), Some("Emoji id"));
    }

    #[test]
    fn test_wire_shape() {
        let unicode = serde_json::to_value(Emoji::from_unicode("🔥").unwrap()).unwrap();
        assert_eq!(unicode, serde_json::json!({ "name": "🔥" }));

        let custom = serde_json::to_value(Emoji::from_custom("github", 5, true).unwrap()).unwrap();
        assert_eq!(
            custom,
            serde_json::json!({ "name": "github", "id": "5", "animated": true })
        );
    }

    #[test]
    fn test_null_name_decodes_as_empty() {
        let emoji: Emoji =
            serde_json::from_value(serde_json::json!({ "name": null, "id": "7" })).unwrap();
        assert_eq!(emoji.name(), "");
        assert!(emoji.is_custom());
    }
}
