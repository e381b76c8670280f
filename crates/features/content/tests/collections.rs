use chrono::{Duration, Utc};
use lobby_content::collection::store;
use lobby_content::*;
use lobby_database::Database;
use lobby_kernel::server::{AdminSession, ApiError};

async fn database(name: &str) -> Database {
    Database::builder()
        .url("mem://")
        .session("content_test", name)
        .migrations(migrations())
        .init()
        .await
        .expect("in-memory database")
}

fn admin() -> AdminSession {
    AdminSession { id: "tester".into(), name: "Tester".into() }
}

fn slide(image: &str, position: i32, active: bool) -> SlideInput {
    SlideInput {
        image_url: image.into(),
        title: format!("Slide {position}"),
        subtitle: String::new(),
        link_url: String::new(),
        button_text: String::new(),
        position,
        is_active: active,
    }
}

fn promotion(slug: &str) -> PromotionInput {
    PromotionInput {
        title: "Welcome bonus".into(),
        slug: slug.into(),
        description: String::new(),
        image_url: String::new(),
        link_url: String::new(),
        badge: "Hot".into(),
        starts_at: None,
        ends_at: None,
        position: 0,
        is_active: true,
    }
}

fn status(err: &ApiError) -> u16 {
    err.status().as_u16()
}

#[tokio::test]
async fn slide_lifecycle() {
    let db = database("lifecycle").await;

    let created: Slide = store::create(&db, slide("/uploads/sliders/a.png", 1, true), &admin()).await.unwrap();
    assert_eq!(created.id.len(), 12);
    assert_eq!(created.created_at, created.updated_at);

    let listed = store::list::<Slide>(&db, None).await.unwrap();
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(store::get::<Slide>(&db, &created.id).await.unwrap(), created);
    assert_eq!(store::get::<Slide>(&db, &format!("slide:{}", created.id)).await.unwrap(), created);

    let mut edit = slide("/uploads/sliders/b.png", 5, false);
    edit.title = "Renamed".into();
    let updated: Slide = store::replace(&db, &created.id, edit, &admin()).await.unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.position, 5);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    store::delete::<Slide>(&db, &created.id, &admin()).await.unwrap();
    assert_eq!(status(&store::get::<Slide>(&db, &created.id).await.unwrap_err()), 404);
    assert_eq!(status(&store::delete::<Slide>(&db, &created.id, &admin()).await.unwrap_err()), 404);
}

#[tokio::test]
async fn lists_follow_position_then_creation() {
    let db = database("ordering").await;
    let third: Slide = store::create(&db, slide("c.png", 2, true), &admin()).await.unwrap();
    let first: Slide = store::create(&db, slide("a.png", 0, true), &admin()).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second: Slide = store::create(&db, slide("b.png", 0, false), &admin()).await.unwrap();

    let ids: Vec<String> = store::list::<Slide>(&db, None).await.unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id.clone(), second.id.clone(), third.id.clone()]);

    let active: Vec<String> =
        store::list::<Slide>(&db, Some(true)).await.unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(active, vec![first.id, third.id]);
}

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    let db = database("required").await;
    let err = store::create::<Slide>(&db, slide("   ", 0, true), &admin()).await.unwrap_err();
    assert_eq!(status(&err), 400);

    let notice = NoticeInput { message: String::new(), link_url: String::new(), position: 0, is_active: true };
    assert_eq!(status(&store::create::<Notice>(&db, notice, &admin()).await.unwrap_err()), 400);
    assert!(store::list::<Notice>(&db, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_promotion_slug_conflicts() {
    let db = database("slugs").await;
    let welcome: Promotion = store::create(&db, promotion("welcome"), &admin()).await.unwrap();

    let err = store::create::<Promotion>(&db, promotion("welcome"), &admin()).await.unwrap_err();
    assert_eq!(status(&err), 409);

    // Keeping its own slug is not a conflict; taking another one is.
    store::replace::<Promotion>(&db, &welcome.id, promotion("welcome"), &admin()).await.unwrap();
    let other: Promotion = store::create(&db, promotion("reload"), &admin()).await.unwrap();
    let err = store::replace::<Promotion>(&db, &other.id, promotion("welcome"), &admin()).await.unwrap_err();
    assert_eq!(status(&err), 409);
}

#[tokio::test]
async fn promotion_window_and_slug_are_validated() {
    let db = database("window").await;

    let mut reversed = promotion("spring");
    reversed.starts_at = Some(Utc::now());
    reversed.ends_at = Some(Utc::now() - Duration::days(1));
    assert_eq!(status(&store::create::<Promotion>(&db, reversed, &admin()).await.unwrap_err()), 400);

    assert_eq!(status(&store::create::<Promotion>(&db, promotion("Spring Sale"), &admin()).await.unwrap_err()), 400);

    let mut window = promotion("summer");
    window.starts_at = Some(Utc::now());
    window.ends_at = Some(Utc::now() + Duration::days(30));
    let created: Promotion = store::create(&db, window, &admin()).await.unwrap();
    let loaded = store::get::<Promotion>(&db, &created.id).await.unwrap();
    assert_eq!(loaded.ends_at.map(|t| t.timestamp()), created.ends_at.map(|t| t.timestamp()));
}

#[tokio::test]
async fn banners_keep_their_placement() {
    let db = database("banners").await;
    let input = BannerInput {
        image_url: "/uploads/banners/x.webp".into(),
        placement: Placement::Sidebar,
        title: String::new(),
        link_url: String::new(),
        alt_text: "Sidebar offer".into(),
        position: 0,
        is_active: true,
    };
    let banner: Banner = store::create(&db, input, &admin()).await.unwrap();

    let loaded = store::get::<Banner>(&db, &banner.id).await.unwrap();
    assert_eq!(loaded.placement, Placement::Sidebar);
    assert_eq!(serde_json::to_value(&loaded).unwrap()["placement"], "sidebar");
}

#[tokio::test]
async fn foreign_or_malformed_ids_are_not_found() {
    let db = database("ids").await;
    for id in ["admin:abc", "abc def", "x;DELETE slide"] {
        assert_eq!(status(&store::get::<Slide>(&db, id).await.unwrap_err()), 404, "{id}");
    }
}
