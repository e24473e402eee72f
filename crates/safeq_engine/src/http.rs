use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use reqwest::cookie::Jar;

use crate::{FailureKind, RequestError};

/// Upper bound on every request the client issues.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ClientSettings {
    pub timeout: Duration,
    /// Source of the local timestamp embedded in export filenames.
    pub now: Arc<dyn Fn() -> NaiveDateTime + Send + Sync>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            now: Arc::new(|| Local::now().naive_local()),
        }
    }
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builds a client bound to its own cookie jar; one per server session.
pub(crate) fn build_client(
    settings: &ClientSettings,
    jar: Arc<Jar>,
) -> Result<reqwest::Client, RequestError> {
    reqwest::Client::builder()
        .cookie_provider(jar)
        .connect_timeout(settings.timeout)
        .timeout(settings.timeout)
        .build()
        .map_err(|err| RequestError::new(FailureKind::Request, err.to_string()))
}

/// Sends the request and turns transport failures and non-2xx statuses into errors.
pub(crate) async fn send_checked(
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, RequestError> {
    let response = request.send().await.map_err(map_reqwest_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(RequestError::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("{status} for url ({})", response.url()),
        ));
    }
    Ok(response)
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    // Connect timeouts report both flags; timeout wins.
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_connect() {
        return RequestError::new(FailureKind::Connection, err.to_string());
    }
    RequestError::new(FailureKind::Request, err.to_string())
}
