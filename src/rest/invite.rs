//! Builder for creating channel invites.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::checks;
use crate::error::{Error, Result};
use crate::models::{Invite, InviteChannel, InviteTargetType};
use crate::utils::parse_snowflake;

use super::{RequestOptions, RestError, RestExecutor, RestRequest, Route, execute};

/// Server default for the invite lifetime, 24 hours.
pub const DEFAULT_MAX_AGE: u32 = 86_400;
/// Longest allowed invite lifetime, 7 days.
pub const MAX_AGE_LIMIT: u32 = 604_800;
pub const MAX_USES_LIMIT: u32 = 100;
pub const REASON_MAX_LENGTH: usize = 512;

/// Creates an invite for a channel. Resolves to the created [`Invite`].
///
/// Every setter accepts `None` to fall back to the server default.
#[derive(Debug, Clone)]
pub struct InviteAction {
    channel: InviteChannel,
    max_age: Option<u32>,
    max_uses: Option<u32>,
    temporary: Option<bool>,
    unique: Option<bool>,
    target_type: Option<InviteTargetType>,
    target_user: Option<u64>,
    target_application: Option<u64>,
    reason: Option<String>,
    options: RequestOptions,
}

impl InviteAction {
    pub fn new(channel: InviteChannel) -> Self {
        Self {
            channel,
            max_age: None,
            max_uses: None,
            temporary: None,
            unique: None,
            target_type: None,
            target_user: None,
            target_application: None,
            reason: None,
            options: RequestOptions::default(),
        }
    }

    /// Lifetime in seconds, `0` for an invite that never expires.
    /// Defaults to [`DEFAULT_MAX_AGE`].
    pub fn set_max_age(mut self, max_age: Option<u32>) -> Result<Self> {
        if let Some(max_age) = max_age {
            checks::not_above(max_age.into(), MAX_AGE_LIMIT.into(), "Max age")?;
        }
        self.max_age = max_age;
        Ok(self)
    }

    /// Same as [`InviteAction::set_max_age`], truncated to whole seconds.
    pub fn set_max_age_duration(self, max_age: Option<Duration>) -> Result<Self> {
        let seconds = match max_age {
            Some(max_age) => Some(u32::try_from(max_age.as_secs()).map_err(|_| {
                Error::invalid_argument("Max age", format!("must be at most {MAX_AGE_LIMIT}"))
            })?),
            None => None,
        };
        self.set_max_age(seconds)
    }

    /// Number of uses, `0` for unlimited (the default).
    pub fn set_max_uses(mut self, max_uses: Option<u32>) -> Result<Self> {
        if let Some(max_uses) = max_uses {
            checks::not_above(max_uses.into(), MAX_USES_LIMIT.into(), "Max uses")?;
        }
        self.max_uses = max_uses;
        Ok(self)
    }

    /// Whether members joining through the invite only get temporary
    /// membership. Defaults to `false`.
    #[must_use]
    pub fn set_temporary(mut self, temporary: Option<bool>) -> Self {
        self.temporary = temporary;
        self
    }

    /// Whether to always create a new invite instead of reusing a similar
    /// one. Defaults to `false`.
    #[must_use]
    pub fn set_unique(mut self, unique: Option<bool>) -> Self {
        self.unique = unique;
        self
    }

    /// Target of a voice channel invite. `None` and `Unknown` clear it.
    pub fn set_target_type(mut self, target_type: Option<InviteTargetType>) -> Result<Self> {
        let target_type = target_type.filter(|t| *t != InviteTargetType::Unknown);
        if target_type.is_some() {
            checks::check(
                self.channel.kind.is_voice(),
                "Target type",
                "can only be set on invites for voice channels",
            )?;
        }
        self.target_type = target_type;
        Ok(self)
    }

    /// Embedded application the invite launches. Also sets the target type
    /// to `EmbeddedApplication`.
    pub fn set_target_application(mut self, application_id: Option<u64>) -> Result<Self> {
        match application_id {
            Some(id) => {
                self = self.set_target_type(Some(InviteTargetType::EmbeddedApplication))?;
                self.target_application = Some(id);
            }
            None => {
                if self.target_type == Some(InviteTargetType::EmbeddedApplication) {
                    self.target_type = None;
                }
                self.target_application = None;
            }
        }
        Ok(self)
    }

    pub fn set_target_application_str(self, application_id: &str) -> Result<Self> {
        let id = parse_snowflake(application_id, "Application id")?;
        self.set_target_application(Some(id))
    }

    /// User whose stream the invite shows. Also sets the target type to
    /// `Stream`. The user must be streaming in the same channel.
    pub fn set_target_user(mut self, user_id: Option<u64>) -> Result<Self> {
        match user_id {
            Some(id) => {
                self = self.set_target_type(Some(InviteTargetType::Stream))?;
                self.target_user = Some(id);
            }
            None => {
                if self.target_type == Some(InviteTargetType::Stream) {
                    self.target_type = None;
                }
                self.target_user = None;
            }
        }
        Ok(self)
    }

    pub fn set_target_user_str(self, user_id: &str) -> Result<Self> {
        let id = parse_snowflake(user_id, "User id")?;
        self.set_target_user(Some(id))
    }

    /// Reason shown in the audit log.
    pub fn reason(mut self, reason: Option<&str>) -> Result<Self> {
        if let Some(reason) = reason {
            checks::not_longer(reason, REASON_MAX_LENGTH, "Reason")?;
        }
        self.reason = reason.map(str::to_string);
        Ok(self)
    }

    #[must_use]
    pub fn set_check(mut self, check: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.options.set_check(check);
        self
    }

    #[must_use]
    pub fn clear_check(mut self) -> Self {
        self.options.clear_check();
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.set_timeout(timeout);
        self
    }

    #[must_use]
    pub fn deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.options.set_deadline(deadline);
        self
    }

    /// Assemble the request without sending it.
    pub fn to_request(&self) -> RestRequest {
        let mut body = Map::new();
        if let Some(max_age) = self.max_age {
            body.insert("max_age".into(), json!(max_age));
        }
        if let Some(max_uses) = self.max_uses {
            body.insert("max_uses".into(), json!(max_uses));
        }
        if let Some(temporary) = self.temporary {
            body.insert("temporary".into(), json!(temporary));
        }
        if let Some(unique) = self.unique {
            body.insert("unique".into(), json!(unique));
        }
        match self.target_type {
            Some(InviteTargetType::Stream) => {
                body.insert("target_type".into(), json!(1));
                if let Some(user) = self.target_user {
                    body.insert("target_user_id".into(), json!(user.to_string()));
                }
            }
            Some(InviteTargetType::EmbeddedApplication) => {
                body.insert("target_type".into(), json!(2));
                if let Some(application) = self.target_application {
                    body.insert("target_application_id".into(), json!(application.to_string()));
                }
            }
            Some(InviteTargetType::Unknown) | None => {}
        }

        let route = Route::create_invite(self.channel.id);
        debug!("Assembled invite creation for {}", route);

        RestRequest {
            route,
            body: Value::Object(body),
            files: Vec::new(),
            reason: self.reason.clone(),
        }
    }

    /// Create the invite through `executor`.
    pub async fn submit(&self, executor: &dyn RestExecutor) -> std::result::Result<Invite, RestError> {
        execute(executor, self.to_request(), &self.options).await
    }
}
