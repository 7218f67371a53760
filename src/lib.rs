//! Herald - message components and REST payload builders for chat bots.
//!
//! ## Architecture
//!
//! - `interactions` - Buttons, action rows, emoji and inbound message commands
//! - `rest` - Request builders (message edits, invites) and the executor seam
//! - `models` - Messages, embeds and invites exchanged with the API
//! - `checks` - Argument checks shared by all validated constructors
//! - `error` - Error types
//! - `utils` - Snowflake helpers
//!
//! Components are immutable values. Every factory and derivation validates
//! the whole result and fails with [`Error::InvalidArgument`] instead of
//! producing an invalid component.

pub mod checks;
pub mod error;
pub mod interactions;
pub mod models;
pub mod rest;
pub mod utils;

pub use error::{Error, Result};
pub use interactions::{ActionRow, Button, ButtonIdentity, ButtonStyle, Emoji};
