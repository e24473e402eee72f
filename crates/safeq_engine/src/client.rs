use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use safeq_core::{
    export_filename, export_form, extract_meta_content, login_form, Session, CSRF_META_NAME,
    DASHBOARD_PATH, EXPORT_PATH, LOGIN_PATH, SESSION_COOKIE,
};
use safeq_logging::{sink_error, sink_info, sink_warn, LogSink};
use uuid::Uuid;

use crate::http::{build_client, map_reqwest_error, send_checked};
use crate::persist::save_export;
use crate::runner::UserExporter;
use crate::{ClientSettings, FailureKind, RequestError};

/// Drives one authenticated session against one server: login, token refresh, export.
///
/// Every request failure is logged here and collapsed into a `false` return;
/// nothing propagates to the caller. A client is single-use: a failed login is
/// terminal and a new server needs a new client (and therefore a new cookie jar).
pub struct ExportClient {
    base_url: String,
    http: reqwest::Client,
    jar: Arc<Jar>,
    settings: ClientSettings,
    session: Session,
    sink: Arc<dyn LogSink>,
    saved_file: Option<PathBuf>,
}

impl ExportClient {
    pub fn new(
        base_url: impl Into<String>,
        settings: ClientSettings,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self, RequestError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let jar = Arc::new(Jar::default());
        let http = build_client(&settings, jar.clone())?;
        Ok(Self {
            base_url,
            http,
            jar,
            settings,
            session: Session::new(),
            sink,
            saved_file: None,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn saved_file(&self) -> Option<&Path> {
        self.saved_file.as_deref()
    }

    /// Value of the server-assigned session cookie, if the jar holds one.
    pub fn session_cookie(&self) -> Option<String> {
        let url = reqwest::Url::parse(&self.base_url).ok()?;
        let header = self.jar.cookies(&url)?;
        let prefix = format!("{SESSION_COOKIE}=");
        header
            .to_str()
            .ok()?
            .split(';')
            .map(str::trim)
            .find_map(|pair| pair.strip_prefix(prefix.as_str()))
            .map(ToOwned::to_owned)
    }

    /// Submits the login form. `true` means the POST itself succeeded; a failed
    /// token refresh afterwards does not change that.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        if !self.session.can_login() {
            sink_warn!(
                self.sink,
                "Login already attempted against {}; a new client is required",
                self.base_url
            );
            return false;
        }

        // The login page's token is never fetched; any opaque value is accepted.
        let nonce = Uuid::new_v4().to_string();
        let request = self
            .http
            .post(self.url(LOGIN_PATH))
            .form(&login_form(username, password, &nonce));

        match send_checked(request).await {
            Ok(_) => {
                self.session.login_succeeded();
                sink_info!(self.sink, "Login successful");
                sink_info!(
                    self.sink,
                    "{}: {}",
                    SESSION_COOKIE,
                    self.session_cookie().as_deref().unwrap_or("None")
                );
                self.update_csrf_token().await;
                true
            }
            Err(err) => {
                self.session.login_failed();
                match err.kind {
                    FailureKind::Timeout => sink_error!(
                        self.sink,
                        "Login request timed out after {} seconds",
                        self.timeout_secs()
                    ),
                    FailureKind::Connection => sink_error!(
                        self.sink,
                        "Failed to connect to the server. Please check your internet connection and the server status."
                    ),
                    _ => sink_error!(self.sink, "Login failed. Error: {}", err.message),
                }
                false
            }
        }
    }

    /// Re-reads the token from the dashboard page. On any failure the current
    /// token is kept and the session is marked stale.
    pub async fn update_csrf_token(&mut self) {
        if !self.session.can_export() {
            sink_warn!(self.sink, "Skipping CSRF token update: not logged in");
            return;
        }

        match self.fetch_csrf_token().await {
            Ok(token) => {
                sink_info!(self.sink, "Updated CSRF Token: {}", token);
                self.session.token_refreshed(token);
            }
            Err(err) => {
                self.session.token_refresh_failed();
                match err.kind {
                    FailureKind::Timeout => sink_error!(
                        self.sink,
                        "CSRF token update request timed out after {} seconds",
                        self.timeout_secs()
                    ),
                    FailureKind::Connection => sink_error!(
                        self.sink,
                        "Failed to connect to the server while updating CSRF token. Error: {}",
                        err.message
                    ),
                    _ => sink_error!(
                        self.sink,
                        "Failed to update CSRF token. Error: {}",
                        err.message
                    ),
                }
            }
        }
    }

    /// Triggers the export servlet and saves the body under `filepath`.
    ///
    /// Returns `true` once the server answered with 2xx, even if the local
    /// save then fails; the save failure is only logged.
    pub async fn export_users(&mut self, filepath: &Path, label: &str) -> bool {
        if !self.session.can_export() {
            sink_error!(
                self.sink,
                "Cannot export users from {}: not logged in",
                self.base_url
            );
            return false;
        }
        self.session.export_attempted();
        self.saved_file = None;

        let body = match self.post_export().await {
            Ok(body) => body,
            Err(err) => {
                match err.kind {
                    FailureKind::Timeout => sink_error!(
                        self.sink,
                        "Export request timed out after {} seconds",
                        self.timeout_secs()
                    ),
                    FailureKind::Connection => sink_error!(
                        self.sink,
                        "Failed to connect to the server while exporting users. Error: {}",
                        err.message
                    ),
                    _ => sink_error!(self.sink, "Failed to export users. Error: {}", err.message),
                }
                return false;
            }
        };

        let filename = export_filename(label, &(self.settings.now)());
        let saved = save_export(filepath, &filename, &body)
            .map_err(|err| RequestError::new(FailureKind::Io, err.to_string()));
        match saved {
            Ok(full_path) => {
                sink_info!(
                    self.sink,
                    "File '{}' has been saved to {}.",
                    filename,
                    full_path.display()
                );
                self.saved_file = Some(full_path);
            }
            Err(err) => sink_error!(self.sink, "Failed to save file. Error: {}", err.message),
        }
        true
    }

    async fn fetch_csrf_token(&self) -> Result<String, RequestError> {
        let response = send_checked(self.http.get(self.url(DASHBOARD_PATH))).await?;
        let html = response.text().await.map_err(map_reqwest_error)?;
        extract_meta_content(&html, CSRF_META_NAME).ok_or_else(|| {
            RequestError::new(
                FailureKind::Parse,
                format!("dashboard page has no <meta name=\"{CSRF_META_NAME}\"> tag with content"),
            )
        })
    }

    async fn post_export(&self) -> Result<Vec<u8>, RequestError> {
        let request = self
            .http
            .post(self.url(EXPORT_PATH))
            .form(&export_form(self.session.csrf_token()));
        let response = send_checked(request).await?;
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(body.to_vec())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn timeout_secs(&self) -> f64 {
        self.settings.timeout.as_secs_f64()
    }
}

#[async_trait::async_trait]
impl UserExporter for ExportClient {
    async fn login(&mut self, username: &str, password: &str) -> bool {
        ExportClient::login(self, username, password).await
    }

    async fn export_users(&mut self, filepath: &Path, label: &str) -> bool {
        ExportClient::export_users(self, filepath, label).await
    }

    fn saved_file(&self) -> Option<&Path> {
        ExportClient::saved_file(self)
    }
}
