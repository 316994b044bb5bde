//! End-to-end account flows against a real document on disk.

use account_store::{AccountError, AccountStore, ProfileUpdate};
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn temp_store() -> (TempDir, AccountStore) {
    init_logging();
    let dir = TempDir::new().expect("tempdir");
    let store = AccountStore::open(dir.path().join("data/accounts.json"));
    (dir, store)
}

#[test]
fn test_signup_logs_in_and_persists() {
    let (_dir, store) = temp_store();
    let user = store
        .signup("Sarah Wilson", "sarah@example.com", "pw")
        .expect("signup");

    assert_eq!(store.current_user().expect("current"), Some(user.clone()));
    assert_eq!(store.users().expect("users"), vec![user]);
    assert!(store.path().exists(), "parent directories are created");
}

#[test]
fn test_duplicate_email_is_rejected_without_side_effects() {
    let (_dir, store) = temp_store();
    store.signup("First", "dup@example.com", "a").expect("first signup");
    store.logout().expect("logout");
    let before = std::fs::read_to_string(store.path()).expect("read");

    let err = store
        .signup("Second", "dup@example.com", "b")
        .expect_err("duplicate should fail");
    assert!(matches!(err, AccountError::EmailTaken));
    assert_eq!(err.to_string(), "Email already registered");

    let after = std::fs::read_to_string(store.path()).expect("read");
    assert_eq!(before, after, "document must be untouched");
    assert!(!store.is_authenticated().expect("auth"));
}

#[test]
fn test_login_logout_cycle() {
    let (_dir, store) = temp_store();
    let user = store.signup("Bilal", "bilal@example.com", "secret").expect("signup");
    store.logout().expect("logout");
    assert_eq!(store.current_user().expect("current"), None);

    let logged_in = store.login("bilal@example.com", "secret").expect("login");
    assert_eq!(logged_in, user);
    assert!(store.is_authenticated().expect("auth"));
}

#[test]
fn test_login_failures_share_one_message() {
    let (_dir, store) = temp_store();
    store.signup("Iqra", "iqra@example.com", "right").expect("signup");

    for (email, password) in [("iqra@example.com", "wrong"), ("nobody@example.com", "right")] {
        let err = store.login(email, password).expect_err("should fail");
        assert_eq!(err.to_string(), "Invalid email or password");
    }
}

#[test]
fn test_update_profile_changes_stored_and_current_user() {
    let (_dir, store) = temp_store();
    store.signup("Old Name", "old@example.com", "pw").expect("signup");

    let updated = store
        .update_profile(ProfileUpdate {
            name: Some("New Name".to_string()),
            ..ProfileUpdate::default()
        })
        .expect("update");
    assert_eq!(updated.name, "New Name");
    assert_eq!(store.current_user().expect("current"), Some(updated.clone()));
    assert_eq!(store.users().expect("users"), vec![updated]);
}

#[test]
fn test_email_change_moves_credentials() {
    let (_dir, store) = temp_store();
    store.signup("Mover", "before@example.com", "pw").expect("signup");
    store
        .update_profile(ProfileUpdate {
            email: Some("after@example.com".to_string()),
            ..ProfileUpdate::default()
        })
        .expect("update");
    store.logout().expect("logout");

    assert!(store.login("before@example.com", "pw").is_err());
    assert!(store.login("after@example.com", "pw").is_ok());
}

#[test]
fn test_two_handles_see_the_same_document() {
    let (_dir, store) = temp_store();
    let other = AccountStore::open(store.path());

    store.signup("Shared", "shared@example.com", "pw").expect("signup");
    assert!(other.is_authenticated().expect("auth"));

    other.logout().expect("logout");
    assert!(!store.is_authenticated().expect("auth"));
}
