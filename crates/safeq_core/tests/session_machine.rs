use safeq_core::{Session, SessionPhase};

#[test]
fn fresh_session_has_no_token_and_cannot_export() {
    let session = Session::new();
    assert_eq!(session.phase(), SessionPhase::Unauthenticated);
    assert_eq!(session.csrf_token(), None);
    assert!(session.can_login());
    assert!(!session.can_export());
}

#[test]
fn login_then_refresh_then_export() {
    let mut session = Session::new();
    session.login_succeeded();
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert!(!session.can_login());

    session.token_refreshed("tok-1");
    assert_eq!(session.csrf_token(), Some("tok-1"));

    session.export_attempted();
    assert_eq!(session.phase(), SessionPhase::Exported);
    assert!(session.can_export());
}

#[test]
fn failed_refresh_keeps_previous_token() {
    let mut session = Session::new();
    session.login_succeeded();
    session.token_refresh_failed();
    assert_eq!(session.phase(), SessionPhase::StaleToken);
    assert_eq!(session.csrf_token(), None);
    assert!(session.can_export());

    // A later successful refresh clears the stale marker.
    session.token_refreshed("tok-2");
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_eq!(session.csrf_token(), Some("tok-2"));
}

#[test]
fn refresh_after_export_replaces_token() {
    let mut session = Session::new();
    session.login_succeeded();
    session.token_refreshed("old");
    session.export_attempted();
    session.token_refreshed("new");
    assert_eq!(session.csrf_token(), Some("new"));
}

#[test]
fn login_failure_is_terminal() {
    let mut session = Session::new();
    session.login_failed();
    assert_eq!(session.phase(), SessionPhase::Failed);

    session.login_succeeded();
    session.token_refreshed("ignored");
    session.export_attempted();

    assert_eq!(session.phase(), SessionPhase::Failed);
    assert_eq!(session.csrf_token(), None);
    assert!(!session.can_login());
    assert!(!session.can_export());
}

#[test]
fn token_is_ignored_before_login() {
    let mut session = Session::new();
    session.token_refreshed("early");
    assert_eq!(session.csrf_token(), None);
    assert_eq!(session.phase(), SessionPhase::Unauthenticated);
}
