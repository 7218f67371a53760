//! REST request assembly.
//!
//! Builders in this module only assemble requests. Sending them is the job
//! of a [`RestExecutor`], the transport seam of the crate:
//!
//! - `RestRequest` - route, JSON body, files and audit-log reason
//! - `RequestOptions` - pre-flight check and deadline shared by all builders
//! - `DryRunExecutor` - records requests instead of sending them
//!
//! ## Usage
//!
//! ```rust,ignore
//! let executor = DryRunExecutor::new(api_base);
//! let invite = InviteAction::new(channel)
//!     .set_max_age(Some(3600))?
//!     .submit(&executor)
//!     .await?;
//! ```

pub mod invite;
pub mod message_update;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

pub use invite::InviteAction;
pub use message_update::{AttachmentOption, WebhookMessageUpdateAction};

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

/// Method and path of an endpoint, relative to the API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub path: String,
}

impl Route {
    pub fn create_invite(channel_id: u64) -> Self {
        Self {
            method: Method::Post,
            path: format!("channels/{}/invites", channel_id),
        }
    }

    /// `message_id` is a snowflake or `@original`.
    pub fn edit_webhook_message(application_id: u64, token: &str, message_id: &str) -> Self {
        Self {
            method: Method::Patch,
            path: format!(
                "webhooks/{}/{}/messages/{}",
                application_id, token, message_id
            ),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.method.as_str(), self.path)
    }
}

/// A file sent alongside the JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub data: Vec<u8>,
}

/// A fully assembled request.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub route: Route,
    pub body: Value,
    pub files: Vec<FileUpload>,
    /// Audit-log reason, for auditable endpoints
    pub reason: Option<String>,
}

/// Sends requests to the API. Implementations own transport, auth and
/// rate limiting.
pub trait RestExecutor: Send + Sync {
    /// Send `request` and resolve to the decoded JSON response.
    fn execute(&self, request: RestRequest) -> BoxFuture<'_, anyhow::Result<Value>>;
}

/// Errors from submitting a request.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The pre-flight check returned false.
    #[error("Request check failed, request was not sent")]
    CheckFailed,

    /// The deadline passed before a response arrived.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    /// The executor failed.
    #[error("Request failed: {0:#}")]
    Executor(#[source] anyhow::Error),

    /// The response did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

type Check = Arc<dyn Fn() -> bool + Send + Sync>;

/// Options every request builder carries.
#[derive(Clone, Default)]
pub struct RequestOptions {
    check: Option<Check>,
    deadline: Option<DateTime<Utc>>,
}

impl RequestOptions {
    /// Run `check` right before sending; the request is dropped if it
    /// returns false.
    pub fn set_check(&mut self, check: impl Fn() -> bool + Send + Sync + 'static) {
        self.check = Some(Arc::new(check));
    }

    pub fn clear_check(&mut self) {
        self.check = None;
    }

    /// Fail the request if it has not completed within `timeout` from now.
    pub fn set_timeout(&mut self, timeout: Duration) {
        let timeout = chrono::Duration::from_std(timeout).unwrap_or(chrono::Duration::MAX);
        self.deadline = Some(Utc::now().checked_add_signed(timeout).unwrap_or(DateTime::<Utc>::MAX_UTC));
    }

    /// Fail the request if it has not completed by `deadline`.
    pub fn set_deadline(&mut self, deadline: DateTime<Utc>) {
        self.deadline = Some(deadline);
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn has_check(&self) -> bool {
        self.check.is_some()
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("check", &self.check.as_ref().map(|_| "<fn>"))
            .field("deadline", &self.deadline)
            .finish()
    }
}

/// Send `request` through `executor`, honoring `options`, and decode the
/// response as `T`.
pub(crate) async fn execute<T: DeserializeOwned>(
    executor: &dyn RestExecutor,
    request: RestRequest,
    options: &RequestOptions,
) -> Result<T, RestError> {
    if let Some(check) = &options.check {
        if !check() {
            warn!("Check failed for {}, not sending", request.route);
            return Err(RestError::CheckFailed);
        }
    }

    debug!("Sending {} with {} file(s)", request.route, request.files.len());

    let response = match options.deadline {
        Some(deadline) => {
            // Negative durations fail to convert, i.e. the deadline has passed.
            let remaining = (deadline - Utc::now())
                .to_std()
                .map_err(|_| RestError::DeadlineExceeded)?;
            tokio::time::timeout(remaining, executor.execute(request))
                .await
                .map_err(|_| RestError::DeadlineExceeded)?
        }
        None => executor.execute(request).await,
    }
    .map_err(RestError::Executor)?;

    serde_json::from_value(response).map_err(RestError::Decode)
}

/// Executor that records requests instead of sending them and answers
/// each one with the same canned response.
#[derive(Debug)]
pub struct DryRunExecutor {
    base: Url,
    response: Value,
    requests: Mutex<Vec<RestRequest>>,
}

impl DryRunExecutor {
    /// Create an executor that resolves routes against `base`.
    pub fn new(base: Url) -> Self {
        Self {
            base,
            response: Value::Object(Default::default()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `response`.
    #[must_use]
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = response;
        self
    }

    /// Full URL a route would be sent to.
    pub fn url_for(&self, route: &Route) -> Result<Url, url::ParseError> {
        self.base.join(route.path.trim_start_matches('/'))
    }

    /// All requests recorded so far.
    pub fn requests(&self) -> Vec<RestRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RestRequest> {
        self.requests.lock().last().cloned()
    }
}

impl RestExecutor for DryRunExecutor {
    fn execute(&self, request: RestRequest) -> BoxFuture<'_, anyhow::Result<Value>> {
        async move {
            let url = self
                .url_for(&request.route)
                .with_context(|| format!("Invalid route {}", request.route))?;
            info!(
                "[dry-run] {} {} body={} files={}",
                request.route.method.as_str(),
                url,
                request.body,
                request.files.len()
            );
            if let Some(reason) = &request.reason {
                info!("[dry-run] audit log reason: {}", reason);
            }
            self.requests.lock().push(request);
            Ok(self.response.clone())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn executor() -> DryRunExecutor {
        DryRunExecutor::new(Url::parse("https://discord.com/api/v10/").unwrap())
    }

    struct FailingExecutor;

    impl RestExecutor for FailingExecutor {
        fn execute(&self, _request: RestRequest) -> BoxFuture<'_, anyhow::Result<Value>> {
            async { Err(anyhow::anyhow!("connection refused")) }.boxed()
        }
    }

    fn request() -> RestRequest {
        RestRequest {
            route: Route::create_invite(1),
            body: json!({ "max_age": 0 }),
            files: Vec::new(),
            reason: None,
        }
    }

    #[test]
    fn test_route_urls() {
        let executor = executor();
        let url = executor
            .url_for(&Route::edit_webhook_message(10, "tok", "@original"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://discord.com/api/v10/webhooks/10/tok/messages/@original"
        );
        assert_eq!(Route::create_invite(5).to_string(), "POST /channels/5/invites");
    }

    #[tokio::test]
    async fn test_dry_run_records_and_answers() {
        let executor = executor().with_response(json!({ "ok": true }));
        let value: Value = execute(&executor, request(), &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(value, json!({ "ok": true }));
        assert_eq!(executor.requests().len(), 1);
        assert_eq!(executor.last_request().unwrap().body, json!({ "max_age": 0 }));
    }

    #[tokio::test]
    async fn test_failed_check_is_not_sent() {
        let executor = executor();
        let mut options = RequestOptions::default();
        options.set_check(|| false);
        let result: Result<Value, _> = execute(&executor, request(), &options).await;
        assert!(matches!(result, Err(RestError::CheckFailed)));
        assert!(executor.requests().is_empty());

        options.clear_check();
        assert!(!options.has_check());
    }

    #[tokio::test]
    async fn test_passed_deadline_is_not_sent() {
        let executor = executor();
        let mut options = RequestOptions::default();
        options.set_deadline(Utc::now() - chrono::Duration::seconds(5));
        let result: Result<Value, _> = execute(&executor, request(), &options).await;
        assert!(matches!(result, Err(RestError::DeadlineExceeded)));
        assert!(executor.requests().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_sets_future_deadline() {
        let mut options = RequestOptions::default();
        options.set_timeout(Duration::from_secs(30));
        assert!(options.deadline().unwrap() > Utc::now());

        let value: Value = execute(&executor(), request(), &options).await.unwrap();
        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn test_executor_and_decode_errors() {
        let result: Result<Value, _> =
            execute(&FailingExecutor, request(), &RequestOptions::default()).await;
        let err = result.unwrap_err();
        assert!(matches!(err, RestError::Executor(_)));
        assert!(err.to_string().contains("connection refused"));

        let result: Result<u32, _> = execute(&executor(), request(), &RequestOptions::default()).await;
        assert!(matches!(result, Err(RestError::Decode(_))));
    }
}
