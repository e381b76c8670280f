use lobby_database::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS promotion SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS promotion_slug ON promotion FIELDS slug UNIQUE;
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Promotion {
    #[serde(default)]
    id: String,
    slug: String,
    title: String,
    position: u32,
    active: bool,
}

fn promo(id: &str, slug: &str, position: u32, active: bool) -> Promotion {
    Promotion { id: id.into(), slug: slug.into(), title: slug.to_uppercase(), position, active }
}

async fn connect(db: &str) -> Database {
    Database::builder()
        .url("mem://")
        .session("test_ns", db)
        .migrations(vec![Migration::new("content", "0001", SCHEMA)])
        .init()
        .await
        .expect("connect to mem://")
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = connect("health").await;
    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "health");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let err = Database::builder().url("mem://").session("", "x").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn documents_round_trip_with_string_ids() {
    let db = connect("docs").await;

    db.create("promotion", "p1", &promo("ignored", "welcome", 2, true)).await.unwrap();
    let loaded: Promotion = db.fetch("promotion", "p1").await.unwrap().expect("stored");
    assert_eq!(loaded, promo("p1", "welcome", 2, true));

    let mut updated = loaded.clone();
    updated.title = "Welcome bonus".into();
    db.upsert("promotion", "p1", &updated).await.unwrap();
    let loaded: Promotion = db.fetch("promotion", "p1").await.unwrap().unwrap();
    assert_eq!(loaded.title, "Welcome bonus");

    assert!(db.exists_with("promotion", "slug", "welcome", None).await.unwrap());
}

#[tokio::test]
async fn removing_reports_whether_the_record_existed() {
    let db = connect("remove").await;
    db.create("promotion", "p1", &promo("p1", "welcome", 1, true)).await.unwrap();
    db.create("promotion", "p2", &promo("p2", "reload", 2, true)).await.unwrap();

    assert!(db.remove("promotion", "p1").await.unwrap());
    assert!(db.fetch::<Promotion>("promotion", "p1").await.unwrap().is_none());
    assert!(!db.remove("promotion", "p1").await.unwrap());
    assert!(!db.remove("promotion", "never-there").await.unwrap());
    assert_eq!(db.count("promotion").await.unwrap(), 1);
}

#[tokio::test]
async fn listing_filters_and_orders() {
    let db = connect("list").await;
    db.create("promotion", "a", &promo("a", "alpha", 3, true)).await.unwrap();
    db.create("promotion", "b", &promo("b", "beta", 1, false)).await.unwrap();
    db.create("promotion", "c", &promo("c", "gamma", 2, true)).await.unwrap();

    let all: Vec<Promotion> = db.fetch_all("promotion", None, &["position ASC"]).await.unwrap();
    assert_eq!(all.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["b", "c", "a"]);

    let active: Vec<Promotion> =
        db.fetch_all("promotion", Some(("active", json!(true))), &["position ASC"]).await.unwrap();
    assert_eq!(active.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["c", "a"]);

    let found: Option<Promotion> = db.find_by("promotion", "slug", "gamma").await.unwrap();
    assert_eq!(found.map(|p| p.id), Some("c".to_owned()));
    assert_eq!(db.count("promotion").await.unwrap(), 3);
}

#[tokio::test]
async fn duplicates_are_conflicts() {
    let db = connect("conflicts").await;
    db.create("promotion", "a", &promo("a", "alpha", 1, true)).await.unwrap();

    let err = db.create("promotion", "a", &promo("a", "other", 1, true)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict { .. }), "{err}");

    let err = db.create("promotion", "b", &promo("b", "alpha", 1, true)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict { .. }), "{err}");

    assert!(db.exists_with("promotion", "slug", "alpha", None).await.unwrap());
    assert!(!db.exists_with("promotion", "slug", "alpha", Some("a")).await.unwrap());
}

#[tokio::test]
async fn empty_tables_count_zero() {
    let db = connect("empty").await;
    assert_eq!(db.count("promotion").await.unwrap(), 0);
    assert!(db.fetch_all::<Promotion>("promotion", None, &[]).await.unwrap().is_empty());
}
