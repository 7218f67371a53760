//! Herald - dry run of the message component and REST builders.
//!
//! Assembles an interaction response edit and a voice channel invite, then
//! sends both through the dry-run executor, which logs each request.
//!
//! ## Environment
//!
//! - `HERALD_APPLICATION_ID`, `HERALD_INTERACTION_TOKEN`, `HERALD_CHANNEL_ID` - required
//! - `HERALD_API_BASE`, `HERALD_REQUEST_TIMEOUT_SECS` - optional
//! - `RUST_LOG` - log filter, defaults to `herald=info`

mod config;

use std::time::Duration;

use anyhow::Context;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use herald::models::{ChannelKind, InviteChannel, Message, MessageEmbed};
use herald::rest::{DryRunExecutor, InviteAction, WebhookMessageUpdateAction};
use herald::{ActionRow, Button, ButtonStyle, Emoji};

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("herald=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting herald dry run...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    info!("API base: {}", config.api_base);

    let message = edit_original_response(&config).await?;
    info!("Edited message now has {} component row(s)", message.components.len());

    let invite = create_invite(&config).await?;
    info!("Invite ready: {}", invite.url());

    Ok(())
}

async fn edit_original_response(config: &Config) -> anyhow::Result<Message> {
    let row = ActionRow::of([
        Button::primary("hello", "Click Me")?,
        Button::success_emoji("emoji", Emoji::from_markdown("<:minn:245267426227388416>")?)?,
        Button::of(ButtonStyle::Danger, "cancel", Some("Cancel"), None)?,
        Button::link("https://docs.rs/herald", "GitHub")?
            .with_emoji(Some(Emoji::from_unicode("🐙")?))?,
    ])?;

    // Echo the edit back as the server would
    let echo = json!({
        "id": "1",
        "content": "Click the button to say hello",
        "components": [row],
    });
    let executor = DryRunExecutor::new(config.api_base.clone()).with_response(echo);

    let edit = WebhookMessageUpdateAction::<Message>::original(
        config.application_id,
        config.interaction_token.as_str(),
    )?
    .set_content(Some("Click the button to say hello"))?
    .set_embeds([MessageEmbed::new()
        .title("Herald")
        .description("Dry run of a message edit")
        .color(0x5865F2)])?
    .set_action_rows([row])?
    .timeout(config.request_timeout);

    edit.submit(&executor)
        .await
        .context("Failed to edit the original response")
}

async fn create_invite(config: &Config) -> anyhow::Result<herald::models::Invite> {
    let executor = DryRunExecutor::new(config.api_base.clone())
        .with_response(json!({ "code": "herald", "max_age": 3600, "max_uses": 10 }));

    let invite = InviteAction::new(InviteChannel::new(config.channel_id, ChannelKind::Voice))
        .set_max_age_duration(Some(Duration::from_secs(3600)))?
        .set_max_uses(Some(10))?
        .set_unique(Some(true))
        .reason(Some("herald dry run"))?
        .timeout(config.request_timeout);

    invite
        .submit(&executor)
        .await
        .context("Failed to create invite")
}
