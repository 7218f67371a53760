//! Message models exchanged with the message endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interactions::{ActionRow, action_row};

/// A message as returned by the API.
///
/// Only the parts the builders read or write are modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::snowflake::option"
    )]
    pub id: Option<u64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::snowflake::option"
    )]
    pub channel_id: Option<u64>,

    /// Text content (may be empty)
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub embeds: Vec<MessageEmbed>,

    /// Button rows below the message. Rows without buttons are not kept.
    #[serde(default, deserialize_with = "action_row::deserialize_message_rows")]
    pub components: Vec<ActionRow>,
}

/// Rich embed attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEmbed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// RGB color as `0xRRGGBB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl MessageEmbed {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
