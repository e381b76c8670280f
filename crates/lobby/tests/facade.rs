use lobby::domain::config::ApiConfig;
use lobby::features;
use lobby_storage::Storage;
use tempfile::TempDir;

#[test]
fn migrations_cover_every_slice() {
    let slices: Vec<&str> = lobby::migrations().iter().map(|m| m.slice).collect();
    assert_eq!(slices, ["auth", "theme", "content"]);
}

#[test]
fn feature_registry_lists_slices() {
    assert!(features::is_enabled("theme"));
    assert!(!features::is_enabled("payments"));
}

#[tokio::test]
async fn init_registers_auth_and_media() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    let slices = lobby::init(&ApiConfig::default(), &storage).unwrap();
    assert!(slices.iter().any(|s| s.downcast::<features::auth::Accounts>().is_some()));
    assert!(slices.iter().any(|s| s.downcast::<features::media::MediaLibrary>().is_some()));
}

#[tokio::test]
async fn bootstrap_without_configured_admin_is_a_no_op() {
    let config = ApiConfig::default();
    let database = lobby_database::Database::builder()
        .url("mem://")
        .session("facade", "bootstrap")
        .migrations(lobby::migrations())
        .init()
        .await
        .unwrap();

    lobby::bootstrap(&config, &database).await.unwrap();
    assert_eq!(database.count("admin").await.unwrap(), 0);
}
