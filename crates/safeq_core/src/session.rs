/// Where a single client's session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Unauthenticated,
    Authenticated,
    /// Logged in, but the last token refresh failed; the held token may be stale or absent.
    StaleToken,
    Exported,
    /// Login failed. Terminal: the client never retries.
    Failed,
}

/// Session bookkeeping owned by exactly one client.
///
/// Cookies live in the HTTP client's jar; this tracks the phase and the most
/// recently observed anti-forgery token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    phase: SessionPhase,
    csrf_token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn can_login(&self) -> bool {
        self.phase == SessionPhase::Unauthenticated
    }

    pub fn can_export(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Authenticated | SessionPhase::StaleToken | SessionPhase::Exported
        )
    }

    pub fn login_succeeded(&mut self) {
        if self.phase == SessionPhase::Unauthenticated {
            self.phase = SessionPhase::Authenticated;
        }
    }

    pub fn login_failed(&mut self) {
        if self.phase == SessionPhase::Unauthenticated {
            self.phase = SessionPhase::Failed;
        }
    }

    /// Stores a freshly observed token. Ignored unless the session is logged in.
    pub fn token_refreshed(&mut self, token: impl Into<String>) {
        if self.can_export() {
            self.csrf_token = Some(token.into());
            self.phase = SessionPhase::Authenticated;
        }
    }

    /// Leaves the token untouched and marks it as possibly stale.
    pub fn token_refresh_failed(&mut self) {
        if self.phase == SessionPhase::Authenticated {
            self.phase = SessionPhase::StaleToken;
        }
    }

    pub fn export_attempted(&mut self) {
        if self.can_export() {
            self.phase = SessionPhase::Exported;
        }
    }
}
