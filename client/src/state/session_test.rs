use super::*;

fn doctor(id: &str, name: &str) -> Doctor {
    Doctor { id: id.to_owned(), name: name.to_owned(), ..Doctor::default() }
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn pending_session_blocks_redirects_until_storage_is_read() {
    let session = Session::pending();
    assert!(session.loading);
    assert!(!session.is_authenticated());
    assert!(!session.needs_profile());
}

#[test]
fn from_token_without_token_is_idle_and_anonymous() {
    let session = Session::from_token(None);
    assert!(!session.is_authenticated());
    assert!(!session.loading);
    assert!(!session.needs_profile());
}

#[test]
fn from_token_with_blank_token_is_anonymous() {
    let session = Session::from_token(Some("  ".to_owned()));
    assert!(!session.is_authenticated());
}

#[test]
fn from_token_with_token_waits_for_profile() {
    let session = Session::from_token(Some("t".to_owned()));
    assert!(session.is_authenticated());
    assert!(session.loading);
    assert!(session.needs_profile());
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn apply_profile_finishes_loading() {
    let mut session = Session::from_token(Some("t".to_owned()));
    session.apply_profile(doctor("d1", "Ann"));
    assert!(!session.loading);
    assert_eq!(session.user_id(), Some("d1"));
    assert!(!session.needs_profile());
}

#[test]
fn signed_in_replaces_previous_identity() {
    let mut session = Session::from_token(Some("old".to_owned()));
    session.apply_profile(doctor("d1", "Ann"));
    session.signed_in("new".to_owned());
    assert_eq!(session.token.as_deref(), Some("new"));
    assert_eq!(session.user_id(), None);
    assert!(session.loading);
}

#[test]
fn profile_failed_keeps_token_but_stops_loading() {
    let mut session = Session::from_token(Some("t".to_owned()));
    session.profile_failed();
    assert!(session.is_authenticated());
    assert!(!session.loading);
}

#[test]
fn clear_drops_token_and_identity() {
    let mut session = Session::from_token(Some("t".to_owned()));
    session.apply_profile(doctor("d1", "Ann"));
    session.clear();
    assert_eq!(session, Session::default());
}

#[test]
fn rename_updates_loaded_profile_only() {
    let mut session = Session::default();
    session.rename("Nobody");
    assert_eq!(session.doctor, None);

    session.apply_profile(doctor("d1", "Ann"));
    session.rename("Anna");
    assert_eq!(session.display_name(), "Anna");
}

// =============================================================
// Display name
// =============================================================

#[test]
fn display_name_truncates_long_names() {
    let mut session = Session::default();
    session.apply_profile(doctor("d1", "Константин Константинопольский"));
    let shown = session.display_name();
    assert_eq!(shown.chars().count(), NAME_DISPLAY_LIMIT + 3);
    assert!(shown.ends_with("..."));
}

#[test]
fn truncate_name_keeps_short_names_intact() {
    assert_eq!(truncate_name("Ann", 20), "Ann");
    assert_eq!(truncate_name("abcdefghijklmnopqrst", 20), "abcdefghijklmnopqrst");
}
