use lobby_auth::{Accounts, init, migrations};
use lobby_domain::config::ApiConfig;

#[test]
fn init_creates_slice() {
    let slice = init(&ApiConfig::default()).expect("init should succeed");
    assert_eq!(slice.id, std::any::TypeId::of::<Accounts>());
    assert_eq!(slice.downcast::<Accounts>().unwrap().password_cost(), 12);
}

#[test]
fn init_rejects_out_of_range_cost() {
    let mut config = ApiConfig::default();
    config.security.password_cost = 2;
    assert!(init(&config).is_err());
}

#[test]
fn admin_schema_is_versioned() {
    let scripts = migrations();
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].slice, "auth");
    assert!(scripts[0].script.contains("admin_username"));
}
