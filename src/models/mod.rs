//! Models exchanged with the REST builders.

pub mod invite;
pub mod message;

pub use invite::{ChannelKind, Invite, InviteChannel, InviteTargetType};
pub use message::{Message, MessageEmbed};
