use lobby_content::{Footer, SiteSettings, migrations};
use lobby_database::Database;
use lobby_kernel::server::AdminSession;
use lobby_kernel::singleton::store;
use serde_json::json;

async fn database(name: &str) -> Database {
    Database::builder()
        .url("mem://")
        .session("site_test", name)
        .migrations(migrations())
        .init()
        .await
        .expect("in-memory database")
}

fn admin() -> AdminSession {
    AdminSession { id: "tester".into(), name: "Tester".into() }
}

#[tokio::test]
async fn settings_are_seeded_with_defaults() {
    let db = database("seed").await;
    let settings = store::load::<SiteSettings>(&db).await.unwrap();
    assert_eq!(settings.site_name, "Lobby");
    assert!(settings.logo_url.is_empty());
    assert!(!settings.maintenance_mode);
}

#[tokio::test]
async fn footer_links_are_validated_on_update() {
    let db = database("footer").await;

    let updated: Footer = store::update(
        &db,
        json!({ "links": [{ "label": "Terms", "url": "/terms" }], "socials": [{ "platform": "telegram", "url": "https://t.me/lobby" }] }),
        &admin(),
    )
    .await
    .unwrap();
    assert_eq!(updated.links.len(), 1);
    assert_eq!(updated.copyright, Footer::default().copyright);

    let err = store::update::<Footer>(&db, json!({ "links": [{ "label": "", "url": "/x" }] }), &admin())
        .await
        .unwrap_err();
    assert_eq!(err.status().as_u16(), 400);

    let err = store::update::<Footer>(&db, json!({ "links": [{ "label": "X" }] }), &admin())
        .await
        .unwrap_err();
    assert_eq!(err.status().as_u16(), 400);

    assert_eq!(store::load::<Footer>(&db).await.unwrap(), updated);

    let drafted: Footer =
        store::update(&db, json!({ "socials": [{ "platform": "instagram", "url": "" }] }), &admin()).await.unwrap();
    assert_eq!(drafted.socials[0].platform, "instagram");
    assert!(drafted.socials[0].url.is_empty());
    assert_eq!(drafted.links, updated.links);
}
