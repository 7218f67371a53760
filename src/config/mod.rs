//! Configuration module for the herald dry-run binary.
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use herald::utils::parse_snowflake;

const DEFAULT_API_BASE: &str = "https://discord.com/api/v10/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL routes are resolved against
    pub api_base: Url,

    // Interaction webhook
    pub application_id: u64,
    pub interaction_token: String,

    /// Channel invites are created in
    pub channel_id: u64,

    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let raw_base = env::var("HERALD_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let mut api_base = Url::parse(&raw_base)
            .with_context(|| format!("HERALD_API_BASE is not a valid URL: {}", raw_base))?;

        // Url::join replaces the last segment unless the base ends with '/'
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }

        let application_id = parse_snowflake(&required("HERALD_APPLICATION_ID")?, "HERALD_APPLICATION_ID")?;
        let channel_id = parse_snowflake(&required("HERALD_CHANNEL_ID")?, "HERALD_CHANNEL_ID")?;

        let request_timeout = match env::var("HERALD_REQUEST_TIMEOUT_SECS") {
            Ok(secs) => secs
                .trim()
                .parse::<u64>()
                .with_context(|| format!("HERALD_REQUEST_TIMEOUT_SECS must be a number: {}", secs))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base,
            application_id,
            interaction_token: required("HERALD_INTERACTION_TOKEN")?,
            channel_id,
            request_timeout: Duration::from_secs(request_timeout),
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("{} must be set", name))
}
