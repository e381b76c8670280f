use lobby_database::Database;
use lobby_kernel::server::AdminSession;
use lobby_kernel::singleton::Singleton;
use lobby_kernel::singleton::store;
use serde_json::json;
use std::borrow::Cow;

#[lobby_derive::singleton(table = "widget_color", slug = "widget-color", validate = check_widget)]
pub struct WidgetColor {
    #[default("#111827")]
    pub background_color: String,
    #[default(64)]
    pub height: u32,
    pub caption: String,
}

fn check_widget(widget: &WidgetColor) -> Result<(), Cow<'static, str>> {
    if widget.height > 1000 { Err("height must not exceed 1000".into()) } else { Ok(()) }
}

fn admin() -> AdminSession {
    AdminSession { id: "tester".into(), name: "Tester".into() }
}

async fn database(name: &str) -> Database {
    Database::builder().url("mem://").session("kernel", name).init().await.expect("mem db")
}

#[test]
fn macro_defaults_and_metadata() {
    let widget = WidgetColor::default();
    assert_eq!(widget.background_color, "#111827");
    assert_eq!(widget.height, 64);
    assert!(widget.caption.is_empty());
    assert_eq!(WidgetColor::TABLE, "widget_color");
    assert_eq!(WidgetColor::SLUG, "widget-color");

    let wire = serde_json::to_value(&widget).unwrap();
    assert_eq!(wire["backgroundColor"], "#111827");
}

#[test]
fn merge_changes_only_given_keys() {
    let merged = store::merge(&WidgetColor::default(), json!({ "height": 80, "id": "main" })).unwrap();
    assert_eq!(merged.height, 80);
    assert_eq!(merged.background_color, "#111827");
}

#[test]
fn merge_rejects_bad_patches() {
    let current = WidgetColor::default();
    for patch in [
        json!({ "colour": "#fff" }),
        json!({ "height": "tall" }),
        json!({ "height": null }),
        json!({ "height": 5000 }),
        json!(["height"]),
    ] {
        let err = store::merge(&current, patch.clone()).unwrap_err();
        assert_eq!(err.status().as_u16(), 400, "{patch}");
    }
}

#[tokio::test]
async fn first_read_seeds_defaults_and_updates_persist() {
    let db = database("seed").await;

    let first: WidgetColor = store::load(&db).await.unwrap();
    assert_eq!(first, WidgetColor::default());
    assert_eq!(db.count("widget_color").await.unwrap(), 1);

    let updated: WidgetColor = store::update(&db, json!({ "caption": "Hot" }), &admin()).await.unwrap();
    assert_eq!(updated.caption, "Hot");

    let reread: WidgetColor = store::load(&db).await.unwrap();
    assert_eq!(reread, updated);

    let reset: WidgetColor = store::reset(&db, &admin()).await.unwrap();
    assert_eq!(reset, WidgetColor::default());
    assert_eq!(store::load::<WidgetColor>(&db).await.unwrap(), WidgetColor::default());
}

#[tokio::test]
async fn update_without_a_stored_document_upserts() {
    let db = database("upsert").await;

    let updated: WidgetColor = store::update(&db, json!({ "height": 12 }), &admin()).await.unwrap();
    assert_eq!(updated.height, 12);
    assert_eq!(db.count("widget_color").await.unwrap(), 1);
}

#[tokio::test]
async fn rejected_patches_leave_the_document_unchanged() {
    let db = database("reject").await;
    store::update::<WidgetColor>(&db, json!({ "caption": "Kept" }), &admin()).await.unwrap();

    assert!(store::update::<WidgetColor>(&db, json!({ "caption": 1 }), &admin()).await.is_err());
    assert_eq!(store::load::<WidgetColor>(&db).await.unwrap().caption, "Kept");
}

#[tokio::test]
async fn concurrent_first_reads_converge() {
    let db = database("race").await;

    let (a, b, c) = tokio::join!(
        store::load::<WidgetColor>(&db),
        store::load::<WidgetColor>(&db),
        store::load::<WidgetColor>(&db),
    );
    assert_eq!(a.unwrap(), b.unwrap());
    assert!(c.is_ok());
    assert_eq!(db.count("widget_color").await.unwrap(), 1);
}
