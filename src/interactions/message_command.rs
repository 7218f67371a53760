//! Inbound message context-menu commands.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::checks;
use crate::error::{Error, Result};
use crate::models::Message;
use crate::rest::WebhookMessageUpdateAction;

const APPLICATION_COMMAND: u8 = 2;
const MESSAGE_COMMAND: u8 = 3;

#[derive(Deserialize)]
struct RawInteraction {
    #[serde(with = "crate::utils::snowflake")]
    id: u64,
    #[serde(with = "crate::utils::snowflake")]
    application_id: u64,
    token: String,
    #[serde(rename = "type")]
    kind: u8,
    data: RawCommandData,
}

#[derive(Deserialize)]
struct RawCommandData {
    name: String,
    #[serde(rename = "type")]
    command_type: u8,
    #[serde(with = "crate::utils::snowflake")]
    target_id: u64,
    #[serde(default)]
    resolved: RawResolved,
}

#[derive(Default, Deserialize)]
struct RawResolved {
    #[serde(default)]
    messages: HashMap<String, Message>,
}

/// A user ran a message command from a message's context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageCommandInteraction {
    id: u64,
    application_id: u64,
    token: String,
    name: String,
    target_id: u64,
    target_message: Message,
}

impl MessageCommandInteraction {
    /// Parse an interaction payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawInteraction = serde_json::from_value(value)?;
        checks::check(
            raw.kind == APPLICATION_COMMAND,
            "type",
            "interaction is not an application command",
        )?;
        checks::check(
            raw.data.command_type == MESSAGE_COMMAND,
            "Command type",
            "is not a message command",
        )?;

        let target_id = raw.data.target_id;
        let mut messages = raw.data.resolved.messages;
        // Resolved maps are keyed by id, fall back to any entry if the key
        // is formatted differently.
        let target_message = match messages.remove(&target_id.to_string()) {
            Some(message) => message,
            None => messages.into_values().next().ok_or_else(|| {
                Error::invalid_argument("resolved.messages", "does not contain the target message")
            })?,
        };

        debug!(
            "Parsed message command '{}' targeting message {}",
            raw.data.name, target_id
        );

        Ok(Self {
            id: raw.id,
            application_id: raw.application_id,
            token: raw.token,
            name: raw.data.name,
            target_id,
            target_message,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn application_id(&self) -> u64 {
        self.application_id
    }

    /// Token for follow-up webhook requests.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the message the command was used on.
    pub fn target_id(&self) -> u64 {
        self.target_id
    }

    pub fn target_message(&self) -> &Message {
        &self.target_message
    }

    /// Builder editing the original response to this interaction.
    pub fn edit_original(&self) -> Result<WebhookMessageUpdateAction<Message>> {
        WebhookMessageUpdateAction::original(self.application_id, self.token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactions::ButtonStyle;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "id": "900000000000000001",
            "application_id": "800000000000000002",
            "type": 2,
            "token": "interaction-token",
            "data": {
                "name": "Bookmark",
                "type": 3,
                "target_id": "700000000000000003",
                "resolved": {
                    "messages": {
                        "700000000000000003": {
                            "id": "700000000000000003",
                            "channel_id": "600000000000000004",
                            "content": "vote below",
                            "components": [{
                                "type": 1,
                                "components": [
                                    { "type": 2, "style": 3, "custom_id": "vote_yes", "label": "Yes" },
                                    { "type": 2, "style": 6, "custom_id": "vote_new", "label": "New" }
                                ]
                            }]
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_parse_message_command() {
        let interaction = MessageCommandInteraction::from_value(payload()).unwrap();
        assert_eq!(interaction.id(), 900000000000000001);
        assert_eq!(interaction.name(), "Bookmark");
        assert_eq!(interaction.target_id(), 700000000000000003);

        let message = interaction.target_message();
        assert_eq!(message.content, "vote below");
        let buttons = message.components[0].buttons();
        assert_eq!(buttons[0].style(), ButtonStyle::Success);
        assert!(buttons[1].style().is_unknown());
        assert_eq!(buttons[1].style().code(), 6);
    }

    #[test]
    fn test_from_json_string() {
        let interaction = MessageCommandInteraction::from_json(&payload().to_string()).unwrap();
        assert_eq!(interaction.token(), "interaction-token");
        assert!(matches!(
            MessageCommandInteraction::from_json("{not json"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_rejects_other_interactions() {
        let mut slash = payload();
        slash["data"]["type"] = json!(1);
        let err = MessageCommandInteraction::from_value(slash).unwrap_err();
        assert_eq!(err.field(), Some("Command type"));

        let mut component = payload();
        component["type"] = json!(3);
        assert_eq!(
            MessageCommandInteraction::from_value(component).unwrap_err().field(),
            Some("type")
        );
    }

    #[test]
    fn test_target_with_select_menu() {
        let mut with_menu = payload();
        with_menu["data"]["resolved"]["messages"]["700000000000000003"]["components"] = json!([
            {
                "type": 1,
                "components": [{
                    "type": 3,
                    "custom_id": "menu",
                    "options": [{ "label": "One", "value": "1" }]
                }]
            },
            {
                "type": 1,
                "components": [
                    { "type": 2, "style": 1, "custom_id": "go", "label": "Go", "emoji": { "name": null, "id": "5" } }
                ]
            }
        ]);

        let interaction = MessageCommandInteraction::from_value(with_menu).unwrap();
        let rows = &interaction.target_message().components;
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains_id("go"));
        assert_eq!(rows[0].buttons()[0].emoji().unwrap().name(), "");
    }

    #[test]
    fn test_missing_target_message() {
        let mut empty = payload();
        empty["data"]["resolved"] = json!({});
        let err = MessageCommandInteraction::from_value(empty).unwrap_err();
        assert_eq!(err.field(), Some("resolved.messages"));
    }

    #[test]
    fn test_edit_original_disables_parsed_buttons() {
        let interaction = MessageCommandInteraction::from_value(payload()).unwrap();
        let rows: Vec<_> = interaction
            .target_message()
            .components
            .iter()
            .map(|row| row.as_disabled())
            .collect();
        let request = interaction
            .edit_original()
            .unwrap()
            .set_action_rows(rows)
            .unwrap()
            .to_request();

        assert_eq!(
            request.route.path,
            "webhooks/800000000000000002/interaction-token/messages/@original"
        );
        let sent = &request.body["components"][0]["components"];
        assert_eq!(sent[0]["disabled"], true);
        assert_eq!(sent[1]["style"], 6);
    }
}
