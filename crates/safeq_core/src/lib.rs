//! SafeQ core: pure session state machine and protocol helpers.
mod export;
mod meta;
mod record;
mod session;

pub use export::{
    export_filename, export_form, login_form, CSRF_FIELD, DASHBOARD_PATH, EXPORT_PATH,
    EXPORT_REDIRECT, LOGIN_PATH, SESSION_COOKIE, TIMESTAMP_FORMAT,
};
pub use meta::{extract_meta_content, CSRF_META_NAME};
pub use record::{ExportResult, ServerRecord};
pub use session::{Session, SessionPhase};
