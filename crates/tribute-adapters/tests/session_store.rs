use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tribute_adapters::{AdapterConfig, SessionStoreAdapter};
use tribute_core::{AuthSession, PortError, SessionContext, SessionStorePort, SessionUser, UserRole};

fn temp_session_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    std::env::temp_dir()
        .join(format!("tribute-session-{tag}-{}-{nanos}", std::process::id()))
        .join("session.json")
}

fn session() -> AuthSession {
    AuthSession {
        token: "tok".to_owned(),
        user: SessionUser {
            id: "1".to_owned(),
            email: "a@b.com".to_owned(),
            name: "A".to_owned(),
            role: UserRole::Admin,
        },
    }
}

#[test]
fn file_store_round_trips_and_clears() {
    let path = temp_session_path("roundtrip");
    let store = SessionStoreAdapter::File(path.clone());

    assert_eq!(store.load().expect("missing file is empty"), None);
    store.save(&session()).expect("save");
    assert!(path.exists());
    assert_eq!(store.load().expect("load"), Some(session()));

    store.clear().expect("clear");
    assert!(!path.exists());
    store.clear().expect("clearing twice is fine");
}

#[test]
fn corrupt_file_is_reported() {
    let path = temp_session_path("corrupt");
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, "{not json").expect("write garbage");

    let store = SessionStoreAdapter::File(path);
    let err = store.load().expect_err("corrupt");
    assert!(matches!(err, PortError::Validation(_)));

    let ctx = SessionContext::restore(store);
    assert!(!ctx.is_signed_in());
}

#[test]
fn config_without_path_uses_memory() {
    let store = SessionStoreAdapter::with_config(&AdapterConfig::default());
    assert!(matches!(store, SessionStoreAdapter::Memory(_)));

    let mut ctx = SessionContext::new(store.clone());
    ctx.sign_in(session()).expect("sign in");
    let restored = SessionContext::restore(store);
    assert!(restored.is_admin());
}
