//! Builder for editing a message sent through an interaction webhook.

use std::fmt;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::checks;
use crate::error::{Error, Result};
use crate::interactions::{ActionRow, Button, action_row};
use crate::models::{Message, MessageEmbed};

use super::{FileUpload, RequestOptions, RestError, RestExecutor, RestRequest, Route, execute};

/// Maximum length of message content.
pub const MAX_CONTENT_LENGTH: usize = 2000;
/// Maximum number of embeds on one message.
pub const MAX_EMBEDS: usize = 10;

const ORIGINAL_MESSAGE: &str = "@original";

/// Options applied to an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentOption {
    /// Blur the attachment until clicked.
    Spoiler,
}

fn attachment_name(name: String, options: &[AttachmentOption]) -> String {
    if options.contains(&AttachmentOption::Spoiler) && !name.starts_with("SPOILER_") {
        format!("SPOILER_{}", name)
    } else {
        name
    }
}

/// Edits a webhook message. Resolves to `T`, usually [`Message`].
///
/// Fields that are never set are left untouched by the edit.
pub struct WebhookMessageUpdateAction<T> {
    application_id: u64,
    token: String,
    message_id: String,
    content: Option<String>,
    embeds: Option<Vec<MessageEmbed>>,
    components: Option<Vec<ActionRow>>,
    files: Vec<FileUpload>,
    options: RequestOptions,
    _result: PhantomData<fn() -> T>,
}

impl<T> WebhookMessageUpdateAction<T> {
    /// Edit the message `message_id` sent by the webhook of `application_id`.
    pub fn new(application_id: u64, token: impl Into<String>, message_id: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let message_id = message_id.into();
        checks::not_blank(&token, "Token")?;
        checks::not_blank(&message_id, "Message id")?;
        Ok(Self {
            application_id,
            token,
            message_id,
            content: None,
            embeds: None,
            components: None,
            files: Vec::new(),
            options: RequestOptions::default(),
            _result: PhantomData,
        })
    }

    /// Edit the original response of an interaction.
    pub fn original(application_id: u64, token: impl Into<String>) -> Result<Self> {
        Self::new(application_id, token, ORIGINAL_MESSAGE)
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Replace the content. `None` removes it.
    pub fn set_content(mut self, content: Option<&str>) -> Result<Self> {
        let content = content.unwrap_or_default();
        checks::not_longer(content, MAX_CONTENT_LENGTH, "Content")?;
        self.content = Some(content.to_string());
        Ok(self)
    }

    /// Replace all embeds. Ephemeral messages ignore embed edits.
    pub fn set_embeds(mut self, embeds: impl IntoIterator<Item = MessageEmbed>) -> Result<Self> {
        let embeds: Vec<MessageEmbed> = embeds.into_iter().collect();
        checks::not_more(embeds.len(), MAX_EMBEDS, "MessageEmbeds")?;
        self.embeds = Some(embeds);
        Ok(self)
    }

    /// Attach a file from memory.
    pub fn add_file(
        mut self,
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
        options: &[AttachmentOption],
    ) -> Result<Self> {
        let name = name.into();
        checks::not_blank(&name, "Name")?;
        self.files.push(FileUpload {
            name: attachment_name(name, options),
            data: data.into(),
        });
        Ok(self)
    }

    /// Attach a file read to the end from `reader`.
    pub fn add_file_reader(
        self,
        name: impl Into<String>,
        mut reader: impl Read,
        options: &[AttachmentOption],
    ) -> Result<Self> {
        let name = name.into();
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::io(name.clone(), e))?;
        self.add_file(name, data, options)
    }

    /// Attach a file from disk, named after the file.
    pub fn add_file_path(self, path: impl AsRef<Path>, options: &[AttachmentOption]) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::invalid_argument("File", "path has no valid file name"))?
            .to_string();
        let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        self.add_file(name, data, options)
    }

    /// Replace all component rows with a single row of `buttons`.
    pub fn set_action_row(self, buttons: impl IntoIterator<Item = Button>) -> Result<Self> {
        let row = ActionRow::of(buttons)?;
        self.set_action_rows([row])
    }

    /// Replace all component rows. An empty list removes them.
    pub fn set_action_rows(mut self, rows: impl IntoIterator<Item = ActionRow>) -> Result<Self> {
        let rows: Vec<ActionRow> = rows.into_iter().collect();
        checks::not_more(rows.len(), action_row::MAX_ROWS, "ActionRows")?;
        self.components = Some(rows);
        Ok(self)
    }

    /// Copy content, embeds and component rows from `message`.
    pub fn apply_message(self, message: &Message) -> Result<Self> {
        self.set_content(Some(message.content.as_str()))?
            .set_embeds(message.embeds.iter().cloned())?
            .set_action_rows(message.components.iter().cloned())
    }

    /// Only send if `check` returns true right before sending.
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
        if let Some(content) = &self.content {
            body.insert("content".into(), Value::String(content.clone()));
        }
        if let Some(embeds) = &self.embeds {
            body.insert("embeds".into(), json!(embeds));
        }
        if let Some(components) = &self.components {
            body.insert("components".into(), json!(components));
        }
        if !self.files.is_empty() {
            let attachments: Vec<Value> = self
                .files
                .iter()
                .enumerate()
                .map(|(id, file)| json!({ "id": id, "filename": file.name }))
                .collect();
            body.insert("attachments".into(), Value::Array(attachments));
        }

        let route = Route::edit_webhook_message(self.application_id, &self.token, &self.message_id);
        debug!("Assembled message update for {}", route);

        RestRequest {
            route,
            body: Value::Object(body),
            files: self.files.clone(),
            reason: None,
        }
    }
}

impl<T: DeserializeOwned> WebhookMessageUpdateAction<T> {
    /// Send the edit through `executor`.
    pub async fn submit(&self, executor: &dyn RestExecutor) -> std::result::Result<T, RestError> {
        execute(executor, self.to_request(), &self.options).await
    }
}

impl<T> fmt::Debug for WebhookMessageUpdateAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookMessageUpdateAction")
            .field("application_id", &self.application_id)
            .field("message_id", &self.message_id)
            .field("content", &self.content)
            .field("embeds", &self.embeds)
            .field("components", &self.components)
            .field("files", &self.files.len())
            .field("options", &self.options)
            .finish()
    }
}
