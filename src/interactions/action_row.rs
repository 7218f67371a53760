//! Action rows: the horizontal containers buttons are placed in.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::checks;
use crate::error::{Error, Result};

use super::Button;

/// Maximum number of buttons in one row.
pub const MAX_BUTTONS: usize = 5;
/// Maximum number of rows on one message.
pub const MAX_ROWS: usize = 5;

const ACTION_ROW_COMPONENT_TYPE: u8 = 1;
const BUTTON_COMPONENT_TYPE: u64 = 2;

/// A row of up to five buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawActionRow", try_from = "RawActionRow")]
pub struct ActionRow {
    buttons: Vec<Button>,
}

impl ActionRow {
    /// Create a row from 1 to 5 buttons.
    pub fn of(buttons: impl IntoIterator<Item = Button>) -> Result<Self> {
        let buttons: Vec<Button> = buttons.into_iter().collect();
        checks::check(!buttons.is_empty(), "Buttons", "may not be empty")?;
        checks::not_more(buttons.len(), MAX_BUTTONS, "Buttons")?;
        Ok(Self { buttons })
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Copy of this row with every button disabled.
    #[must_use]
    pub fn as_disabled(&self) -> Self {
        self.with_disabled(true)
    }

    /// Copy of this row with every button enabled.
    #[must_use]
    pub fn as_enabled(&self) -> Self {
        self.with_disabled(false)
    }

    #[must_use]
    pub fn with_disabled(&self, disabled: bool) -> Self {
        Self {
            buttons: self.buttons.iter().map(|b| b.with_disabled(disabled)).collect(),
        }
    }

    /// Whether any button in this row uses `custom_id`.
    pub fn contains_id(&self, custom_id: &str) -> bool {
        self.buttons.iter().any(|b| b.id() == Some(custom_id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawActionRow {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default, deserialize_with = "buttons_only")]
    components: Vec<Button>,
}

fn component_type(value: &Value) -> Option<u64> {
    value.get("type").and_then(Value::as_u64)
}

/// Decode the buttons of a row, skipping components of other types
/// (select menus, text inputs).
fn buttons_only<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<Button>, D::Error> {
    let components = Vec::<Value>::deserialize(deserializer)?;
    components
        .into_iter()
        .filter(|component| {
            component_type(component).unwrap_or(BUTTON_COMPONENT_TYPE) == BUTTON_COMPONENT_TYPE
        })
        .map(|component| {
            serde_json::from_value::<Button>(component)
                .map_err(<D::Error as serde::de::Error>::custom)
        })
        .collect()
}

/// Decode the component rows of a received message.
///
/// Rows holding no buttons are dropped, as are top-level components that
/// are not rows.
pub(crate) fn deserialize_message_rows<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<ActionRow>, D::Error> {
    let components = Vec::<Value>::deserialize(deserializer)?;
    let mut rows = Vec::new();
    for component in components {
        if component_type(&component) != Some(u64::from(ACTION_ROW_COMPONENT_TYPE)) {
            continue;
        }
        let row: ActionRow = serde_json::from_value(component)
            .map_err(<D::Error as serde::de::Error>::custom)?;
        if !row.buttons.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

impl From<ActionRow> for RawActionRow {
    fn from(row: ActionRow) -> Self {
        Self {
            kind: ACTION_ROW_COMPONENT_TYPE,
            components: row.buttons,
        }
    }
}

impl TryFrom<RawActionRow> for ActionRow {
    type Error = Error;

    fn try_from(raw: RawActionRow) -> Result<Self> {
        checks::check(
            raw.kind == ACTION_ROW_COMPONENT_TYPE,
            "type",
            "component is not an action row",
        )?;
        Ok(Self {
            buttons: raw.components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn buttons(n: usize) -> Vec<Button> {
        (0..n)
            .map(|i| Button::secondary(format!("b{i}"), format!("Button {i}")).unwrap())
            .collect()
    }

    #[test]
    fn test_row_size_limits() {
        assert!(ActionRow::of(buttons(1)).is_ok());
        assert!(ActionRow::of(buttons(5)).is_ok());
        assert_eq!(ActionRow::of(buttons(0)).unwrap_err().field(), Some("Buttons"));
        assert_eq!(ActionRow::of(buttons(6)).unwrap_err().field(), Some("Buttons"));
    }

    #[test]
    fn test_row_disable_all() {
        let row = ActionRow::of(buttons(3)).unwrap();
        let disabled = row.as_disabled();
        assert!(disabled.buttons().iter().all(Button::is_disabled));
        assert_eq!(disabled.as_enabled(), row);
        assert!(row.contains_id("b2"));
        assert!(!row.contains_id("b3"));
    }

    #[test]
    fn test_row_wire_shape() {
        let row = ActionRow::of(buttons(1)).unwrap();
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "type": 1,
                "components": [
                    { "type": 2, "style": 2, "custom_id": "b0", "label": "Button 0", "disabled": false }
                ]
            })
        );
        let back: ActionRow = serde_json::from_value(serde_json::to_value(&row).unwrap()).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_received_row_skips_other_components() {
        let row: ActionRow = serde_json::from_value(json!({
            "type": 1,
            "components": [
                { "type": 3, "custom_id": "menu", "options": [{ "label": "A", "value": "a" }] },
                { "type": 2, "style": 1, "custom_id": "go", "label": "Go" }
            ]
        }))
        .unwrap();
        assert_eq!(row.buttons().len(), 1);
        assert!(row.contains_id("go"));
    }
}
