//! Invite models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What a voice channel invite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InviteTargetType {
    /// Show a user's screen share
    Stream,
    /// Launch an embedded application
    EmbeddedApplication,
    /// No target, or one this client does not know
    Unknown,
}

impl InviteTargetType {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Stream,
            2 => Self::EmbeddedApplication,
            _ => Self::Unknown,
        }
    }

    /// Wire code; `None` for `Unknown`.
    pub fn code(self) -> Option<u8> {
        match self {
            Self::Stream => Some(1),
            Self::EmbeddedApplication => Some(2),
            Self::Unknown => None,
        }
    }
}

impl Serialize for InviteTargetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.code() {
            Some(code) => serializer.serialize_u8(code),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for InviteTargetType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from_code)
    }
}

/// Kind of channel an invite is created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Text,
    News,
    Voice,
    Stage,
}

impl ChannelKind {
    /// Voice-capable channels accept invite targets.
    pub fn is_voice(self) -> bool {
        matches!(self, Self::Voice | Self::Stage)
    }
}

/// Channel an invite is created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InviteChannel {
    pub id: u64,
    pub kind: ChannelKind,
}

impl InviteChannel {
    pub fn new(id: u64, kind: ChannelKind) -> Self {
        Self { id, kind }
    }
}

/// An invite as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    pub code: String,

    /// Lifetime in seconds, 0 = never expires
    #[serde(default)]
    pub max_age: u32,

    /// 0 = unlimited
    #[serde(default)]
    pub max_uses: u32,

    #[serde(default)]
    pub uses: u32,

    /// Members joining through this invite are kicked when they go offline
    #[serde(default)]
    pub temporary: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<InviteTargetType>,
}

impl Invite {
    /// Shareable URL for this invite.
    pub fn url(&self) -> String {
        format!("https://discord.gg/{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_invite_decoding() {
        let invite: Invite = serde_json::from_value(serde_json::json!({
            "code": "abc123",
            "max_age": 3600,
            "max_uses": 10,
            "uses": 2,
            "temporary": true,
            "created_at": "2021-06-01T12:00:00Z",
            "expires_at": "2021-06-01T13:00:00Z",
            "target_type": 1
        }))
        .unwrap();

        assert_eq!(invite.url(), "https://discord.gg/abc123");
        assert_eq!(invite.target_type, Some(InviteTargetType::Stream));
        assert_eq!(
            invite.expires_at,
            Some(Utc.with_ymd_and_hms(2021, 6, 1, 13, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unknown_target_type() {
        assert_eq!(InviteTargetType::from_code(9), InviteTargetType::Unknown);
        assert_eq!(InviteTargetType::Unknown.code(), None);
        assert!(ChannelKind::Stage.is_voice());
        assert!(!ChannelKind::Text.is_voice());
    }
}
