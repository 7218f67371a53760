//! Interactive message components and inbound interactions.
//!
//! - `Button` - validated, immutable button descriptor
//! - `ActionRow` - row of buttons attached to a message
//! - `Emoji` - emoji shown on a component
//! - `MessageCommandInteraction` - message context-menu command payload

pub mod action_row;
pub mod button;
pub mod emoji;
pub mod message_command;

pub use action_row::ActionRow;
pub use button::{Button, ButtonIdentity, ButtonStyle, UnknownStyle};
pub use emoji::Emoji;
pub use message_command::MessageCommandInteraction;
