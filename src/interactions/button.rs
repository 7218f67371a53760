//! Interactive message buttons.
//!
//! A [`Button`] is an immutable value. It is created by one of the named
//! factories ([`Button::primary`], [`Button::link`], [`Button::of`], ...)
//! and changed only by deriving a new value (`with_*` / `as_*`). Every
//! factory and every fallible derivation validates the complete result:
//!
//! - `LINK` buttons carry a URL (1..=512 chars), all other styles carry a
//!   custom id (1..=100 chars).
//! - The label is at most 80 chars and may only be empty if an emoji is set.
//! - The `UNKNOWN` style is never accepted for a new button.
//!
//! ```ignore
//! let hello = Button::primary("hello", "Click Me")?;
//! let docs = Button::link("https://docs.rs", "Docs")?
//!     .with_emoji(Some(Emoji::from_unicode("📚")?))?;
//! let locked = hello.as_disabled();
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::checks;
use crate::error::{Error, Result};

use super::Emoji;

/// Maximum length of a custom id.
pub const ID_MAX_LENGTH: usize = 100;
/// Maximum length of a link button URL.
pub const URL_MAX_LENGTH: usize = 512;
/// Maximum length of a button label.
pub const LABEL_MAX_LENGTH: usize = 80;

/// Component type code for buttons on the wire.
const BUTTON_COMPONENT_TYPE: u8 = 2;

/// A style code this client does not recognize.
///
/// Only produced when decoding server payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownStyle(u8);

impl UnknownStyle {
    /// The raw wire code.
    pub fn raw(self) -> u8 {
        self.0
    }
}

/// Appearance of a button. `Link` also decides that the button opens a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
    Link,
    /// Style received from the server that this client does not know yet.
    Unknown(UnknownStyle),
}

impl ButtonStyle {
    pub(crate) fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Primary,
            2 => Self::Secondary,
            3 => Self::Success,
            4 => Self::Danger,
            5 => Self::Link,
            other => Self::Unknown(UnknownStyle(other)),
        }
    }

    /// Wire code of this style.
    pub fn code(self) -> u8 {
        match self {
            Self::Primary => 1,
            Self::Secondary => 2,
            Self::Success => 3,
            Self::Danger => 4,
            Self::Link => 5,
            Self::Unknown(raw) => raw.0,
        }
    }

    pub fn is_link(self) -> bool {
        self == Self::Link
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Secondary => "SECONDARY",
            Self::Success => "SUCCESS",
            Self::Danger => "DANGER",
            Self::Link => "LINK",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ButtonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ButtonStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for ButtonStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from_code)
    }
}

/// What a button does when clicked: report its custom id back to the bot,
/// or open a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ButtonIdentity {
    CustomId(String),
    Url(String),
}

impl ButtonIdentity {
    /// The id or URL.
    pub fn as_str(&self) -> &str {
        match self {
            Self::CustomId(value) | Self::Url(value) => value,
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    fn field(&self) -> &'static str {
        match self {
            Self::CustomId(_) => "Id",
            Self::Url(_) => "URL",
        }
    }

    fn max_length(&self) -> usize {
        match self {
            Self::CustomId(_) => ID_MAX_LENGTH,
            Self::Url(_) => URL_MAX_LENGTH,
        }
    }

    fn for_style(style: ButtonStyle, id_or_url: String) -> Self {
        if style.is_link() {
            Self::Url(id_or_url)
        } else {
            Self::CustomId(id_or_url)
        }
    }
}

/// A message button.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RawButton", try_from = "RawButton")]
pub struct Button {
    identity: ButtonIdentity,
    label: String,
    style: ButtonStyle,
    emoji: Option<Emoji>,
    disabled: bool,
}

/// Checks every invariant of a button. Presence checks run before length
/// checks so the reported field is stable for a given input.
fn validate(
    identity: &ButtonIdentity,
    label: &str,
    style: ButtonStyle,
    emoji: Option<&Emoji>,
) -> Result<()> {
    checks::check(!style.is_unknown(), "Style", "cannot be UNKNOWN")?;
    checks::not_empty(identity.as_str(), identity.field())?;
    match identity {
        ButtonIdentity::CustomId(_) => checks::check(
            !style.is_link(),
            "Style",
            "LINK buttons need a URL instead of a custom id",
        )?,
        ButtonIdentity::Url(_) => checks::check(
            style.is_link(),
            "Style",
            "only LINK buttons can carry a URL",
        )?,
    }
    checks::check(
        !label.is_empty() || emoji.is_some(),
        "label/emoji",
        "at least one of label or emoji must be set",
    )?;
    checks::not_longer(identity.as_str(), identity.max_length(), identity.field())?;
    checks::not_longer(label, LABEL_MAX_LENGTH, "Label")?;
    Ok(())
}

impl Button {
    fn build(
        identity: ButtonIdentity,
        label: String,
        style: ButtonStyle,
        emoji: Option<Emoji>,
        disabled: bool,
    ) -> Result<Self> {
        validate(&identity, &label, style, emoji.as_ref())?;
        Ok(Self {
            identity,
            label,
            style,
            emoji,
            disabled,
        })
    }

    fn labeled(style: ButtonStyle, identity: ButtonIdentity, label: String) -> Result<Self> {
        checks::not_empty(identity.as_str(), identity.field())?;
        checks::not_empty(&label, "Label")?;
        checks::not_longer(identity.as_str(), identity.max_length(), identity.field())?;
        checks::not_longer(&label, LABEL_MAX_LENGTH, "Label")?;
        Self::build(identity, label, style, None, false)
    }

    fn emoji_only(style: ButtonStyle, identity: ButtonIdentity, emoji: Emoji) -> Result<Self> {
        checks::not_empty(identity.as_str(), identity.field())?;
        checks::not_longer(identity.as_str(), identity.max_length(), identity.field())?;
        Self::build(identity, String::new(), style, Some(emoji), false)
    }

    /// Primary (blurple) button with a text label.
    pub fn primary(id: impl Into<String>, label: impl Into<String>) -> Result<Self> {
        Self::labeled(ButtonStyle::Primary, ButtonIdentity::CustomId(id.into()), label.into())
    }

    /// Primary button showing only an emoji.
    pub fn primary_emoji(id: impl Into<String>, emoji: Emoji) -> Result<Self> {
        Self::emoji_only(ButtonStyle::Primary, ButtonIdentity::CustomId(id.into()), emoji)
    }

    /// Secondary (grey) button with a text label.
    pub fn secondary(id: impl Into<String>, label: impl Into<String>) -> Result<Self> {
        Self::labeled(ButtonStyle::Secondary, ButtonIdentity::CustomId(id.into()), label.into())
    }

    pub fn secondary_emoji(id: impl Into<String>, emoji: Emoji) -> Result<Self> {
        Self::emoji_only(ButtonStyle::Secondary, ButtonIdentity::CustomId(id.into()), emoji)
    }

    /// Success (green) button with a text label.
    pub fn success(id: impl Into<String>, label: impl Into<String>) -> Result<Self> {
        Self::labeled(ButtonStyle::Success, ButtonIdentity::CustomId(id.into()), label.into())
    }

    pub fn success_emoji(id: impl Into<String>, emoji: Emoji) -> Result<Self> {
        Self::emoji_only(ButtonStyle::Success, ButtonIdentity::CustomId(id.into()), emoji)
    }

    /// Danger (red) button with a text label.
    pub fn danger(id: impl Into<String>, label: impl Into<String>) -> Result<Self> {
        Self::labeled(ButtonStyle::Danger, ButtonIdentity::CustomId(id.into()), label.into())
    }

    pub fn danger_emoji(id: impl Into<String>, emoji: Emoji) -> Result<Self> {
        Self::emoji_only(ButtonStyle::Danger, ButtonIdentity::CustomId(id.into()), emoji)
    }

    /// Link button with a text label. Link buttons open `url` in the
    /// browser and never report a click back to the bot.
    pub fn link(url: impl Into<String>, label: impl Into<String>) -> Result<Self> {
        Self::labeled(ButtonStyle::Link, ButtonIdentity::Url(url.into()), label.into())
    }

    pub fn link_emoji(url: impl Into<String>, emoji: Emoji) -> Result<Self> {
        Self::emoji_only(ButtonStyle::Link, ButtonIdentity::Url(url.into()), emoji)
    }

    /// Link button for an already parsed URL.
    pub fn link_to(url: &url::Url, label: impl Into<String>) -> Result<Self> {
        Self::link(url.as_str(), label)
    }

    /// Button of any style with a text label. `id_or_url` is the URL for
    /// `Link` and the custom id otherwise.
    pub fn of_label(
        style: ButtonStyle,
        id_or_url: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self> {
        checks::check(!style.is_unknown(), "Style", "cannot be UNKNOWN")?;
        Self::labeled(style, ButtonIdentity::for_style(style, id_or_url.into()), label.into())
    }

    /// Button of any style showing only an emoji.
    pub fn of_emoji(style: ButtonStyle, id_or_url: impl Into<String>, emoji: Emoji) -> Result<Self> {
        checks::check(!style.is_unknown(), "Style", "cannot be UNKNOWN")?;
        Self::emoji_only(style, ButtonIdentity::for_style(style, id_or_url.into()), emoji)
    }

    /// Button of any style with a label, an emoji, or both.
    ///
    /// An empty label counts as no label. Fails on `label/emoji` if
    /// neither is given.
    pub fn of(
        style: ButtonStyle,
        id_or_url: impl Into<String>,
        label: Option<&str>,
        emoji: Option<Emoji>,
    ) -> Result<Self> {
        checks::check(!style.is_unknown(), "Style", "cannot be UNKNOWN")?;
        match (label.filter(|label| !label.is_empty()), emoji) {
            (Some(label), emoji) => Self::of_label(style, id_or_url, label)?.with_emoji(emoji),
            (None, Some(emoji)) => Self::of_emoji(style, id_or_url, emoji),
            (None, None) => Err(Error::invalid_argument(
                "label/emoji",
                "at least one of label or emoji must be provided",
            )),
        }
    }

    pub fn identity(&self) -> &ButtonIdentity {
        &self.identity
    }

    /// Custom id, absent for link buttons.
    pub fn id(&self) -> Option<&str> {
        match &self.identity {
            ButtonIdentity::CustomId(id) => Some(id),
            ButtonIdentity::Url(_) => None,
        }
    }

    /// Target URL, present only for link buttons.
    pub fn url(&self) -> Option<&str> {
        match &self.identity {
            ButtonIdentity::Url(url) => Some(url),
            ButtonIdentity::CustomId(_) => None,
        }
    }

    /// Visible text. Empty when the button shows only an emoji.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> ButtonStyle {
        self.style
    }

    pub fn emoji(&self) -> Option<&Emoji> {
        self.emoji.as_ref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Copy with the given disabled flag.
    ///
    /// The flag carries no constraint, so this cannot fail.
    #[must_use]
    pub fn with_disabled(&self, disabled: bool) -> Self {
        Self {
            disabled,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn as_disabled(&self) -> Self {
        self.with_disabled(true)
    }

    #[must_use]
    pub fn as_enabled(&self) -> Self {
        self.with_disabled(false)
    }

    /// Copy with `emoji` attached, or removed for `None`.
    ///
    /// Removing the emoji of a button without a label fails on
    /// `label/emoji`; use [`Button::with_label_and_emoji`] to swap both.
    pub fn with_emoji(&self, emoji: Option<Emoji>) -> Result<Self> {
        Self::build(
            self.identity.clone(),
            self.label.clone(),
            self.style,
            emoji,
            self.disabled,
        )
    }

    /// Copy with a new label. An empty label is accepted only if the
    /// button has an emoji.
    pub fn with_label(&self, label: impl Into<String>) -> Result<Self> {
        Self::build(
            self.identity.clone(),
            label.into(),
            self.style,
            self.emoji.clone(),
            self.disabled,
        )
    }

    /// Copy with label and emoji replaced together.
    pub fn with_label_and_emoji(&self, label: impl Into<String>, emoji: Option<Emoji>) -> Result<Self> {
        Self::build(self.identity.clone(), label.into(), self.style, emoji, self.disabled)
    }

    /// Copy with a custom id instead of the current id or URL.
    ///
    /// The style is kept, so this fails on a link button until its style
    /// is changed as well.
    pub fn with_id(&self, id: impl Into<String>) -> Result<Self> {
        Self::build(
            ButtonIdentity::CustomId(id.into()),
            self.label.clone(),
            self.style,
            self.emoji.clone(),
            self.disabled,
        )
    }

    /// Copy that opens `url`. The result is always a `Link` button.
    pub fn with_url(&self, url: impl Into<String>) -> Result<Self> {
        Self::build(
            ButtonIdentity::Url(url.into()),
            self.label.clone(),
            ButtonStyle::Link,
            self.emoji.clone(),
            self.disabled,
        )
    }

    /// Copy with another style.
    ///
    /// Cannot turn a link button into a styled button or the other way
    /// round; use [`Button::with_url`] or [`Button::with_id`] for that.
    pub fn with_style(&self, style: ButtonStyle) -> Result<Self> {
        checks::check(!style.is_unknown(), "Style", "cannot be UNKNOWN")?;
        if self.style.is_link() && !style.is_link() {
            return Err(Error::invalid_argument(
                "Style",
                "cannot change a link button to another style",
            ));
        }
        if !self.style.is_link() && style.is_link() {
            return Err(Error::invalid_argument(
                "Style",
                "cannot change a styled button to a link button",
            ));
        }
        Self::build(
            self.identity.clone(),
            self.label.clone(),
            style,
            self.emoji.clone(),
            self.disabled,
        )
    }
}

/// Wire shape of a button component.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawButton {
    #[serde(rename = "type", default = "button_component_type")]
    kind: u8,
    style: ButtonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default)]
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emoji: Option<Emoji>,
    #[serde(default)]
    disabled: bool,
}

fn button_component_type() -> u8 {
    BUTTON_COMPONENT_TYPE
}

impl From<Button> for RawButton {
    fn from(button: Button) -> Self {
        let (custom_id, url) = match button.identity {
            ButtonIdentity::CustomId(id) => (Some(id), None),
            ButtonIdentity::Url(url) => (None, Some(url)),
        };
        Self {
            kind: BUTTON_COMPONENT_TYPE,
            style: button.style,
            custom_id,
            url,
            label: button.label,
            emoji: button.emoji,
            disabled: button.disabled,
        }
    }
}

/// Decoding trusts the server for lengths and label presence, and may
/// yield an unknown style. It still rejects identities no button can have.
impl TryFrom<RawButton> for Button {
    type Error = Error;

    fn try_from(raw: RawButton) -> Result<Self> {
        checks::check(
            raw.kind == BUTTON_COMPONENT_TYPE,
            "type",
            "component is not a button",
        )?;
        let identity = match (raw.custom_id, raw.url) {
            (Some(id), None) => ButtonIdentity::CustomId(id),
            (None, Some(url)) => ButtonIdentity::Url(url),
            (Some(_), Some(_)) => {
                return Err(Error::invalid_argument(
                    "custom_id/url",
                    "a button cannot have both a custom id and a URL",
                ));
            }
            (None, None) => {
                return Err(Error::invalid_argument(
                    "custom_id/url",
                    "a button needs a custom id or a URL",
                ));
            }
        };
        checks::not_empty(identity.as_str(), identity.field())?;
        if !raw.style.is_unknown() {
            checks::check(
                raw.style.is_link() == identity.is_url(),
                "Style",
                "does not match the button's id or URL",
            )?;
        }
        Ok(Self {
            identity,
            label: raw.label,
            style: raw.style,
            emoji: raw.emoji,
            disabled: raw.disabled,
        })
    }
}
