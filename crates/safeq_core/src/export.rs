use chrono::NaiveDateTime;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/web/Dashboard";
pub const EXPORT_PATH: &str = "/servlet/users.ExportUsersServlet";

pub const CSRF_FIELD: &str = "_csrf";
pub const SESSION_COOKIE: &str = "JSESSIONID";
pub const EXPORT_REDIRECT: &str = "/WEB-INF/views/legacy/web/UserList.jsp";

/// `strftime` pattern of the timestamp embedded in export filenames.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `{label}_exported_users_{YYYYMMDD_HHMMSS}.csv`
pub fn export_filename(label: &str, timestamp: &NaiveDateTime) -> String {
    format!(
        "{label}_exported_users_{}.csv",
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

pub fn login_form<'a>(
    username: &'a str,
    password: &'a str,
    csrf: &'a str,
) -> Vec<(&'static str, &'a str)> {
    vec![
        ("username", username),
        ("password", password),
        (CSRF_FIELD, csrf),
    ]
}

/// Fixed-shape export form. The token field is left out when none has been observed.
pub fn export_form(csrf: Option<&str>) -> Vec<(&'static str, &str)> {
    let mut form = vec![
        ("redirect", EXPORT_REDIRECT),
        ("charset", "UTF8"),
        ("users", "1"),
    ];
    if let Some(token) = csrf {
        form.push((CSRF_FIELD, token));
    }
    form
}
