use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use axum::http::Request;
use axum::http::header::CONTENT_TYPE;
use lobby_domain::config::ApiConfig;
use lobby_media::{MediaError, MediaLibrary, UploadKind, init};
use lobby_storage::Storage;
use tempfile::TempDir;

const BOUNDARY: &str = "lobby-test-boundary";
const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

async fn library(temp: &TempDir, max_file_size: usize) -> MediaLibrary {
    let storage = Storage::builder().root(temp.path()).connect().await.expect("storage");
    let mut config = ApiConfig::default();
    config.uploads.max_file_size = max_file_size;
    config.storage.public_url = "https://cdn.example.com/".into();

    let slice = init(&config, storage).expect("media slice");
    slice.downcast::<MediaLibrary>().cloned().expect("media library")
}

async fn multipart(field: &str, file_name: &str, data: &[u8]) -> Multipart {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nignored\r\n\
         --{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    Multipart::from_request(request, &()).await.expect("multipart")
}

#[tokio::test]
async fn accepted_images_are_content_addressed() {
    let temp = TempDir::new().unwrap();
    let media = library(&temp, 1024).await;

    let stored = media
        .accept(multipart("file", "Hero.PNG", PNG).await, "sliders", UploadKind::Image)
        .await
        .unwrap();

    assert!(stored.file_name.ends_with(".png"));
    assert_eq!(stored.file_name.len(), 64 + 4);
    assert_eq!(stored.size, PNG.len() as u64);
    assert_eq!(stored.content_type, "image/png");

    let shard = format!("{}/{}", &stored.file_name[..2], &stored.file_name[2..4]);
    assert_eq!(
        stored.url,
        format!("https://cdn.example.com/uploads/sliders/{shard}/{}", stored.file_name)
    );
    assert!(temp.path().join("sliders").join(&shard).join(&stored.file_name).is_file());
}

#[tokio::test]
async fn identical_uploads_share_a_file() {
    let temp = TempDir::new().unwrap();
    let media = library(&temp, 1024).await;

    let first = media.accept(multipart("image", "a.png", PNG).await, "banners", UploadKind::Image);
    let first = first.await.unwrap();
    let second = media.accept(multipart("file", "b.png", PNG).await, "banners", UploadKind::Image);
    let second = second.await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn disallowed_extensions_are_rejected() {
    let temp = TempDir::new().unwrap();
    let media = library(&temp, 1024).await;

    for (name, kind) in [
        ("payload.exe", UploadKind::Image),
        ("favicon.gif", UploadKind::Icon),
        ("noextension", UploadKind::Image),
    ] {
        let err = media.accept(multipart("file", name, PNG).await, "branding", kind).await;
        assert!(matches!(err, Err(MediaError::Rejected { .. })), "{name}");
    }
}

#[tokio::test]
async fn empty_and_missing_files_are_rejected() {
    let temp = TempDir::new().unwrap();
    let media = library(&temp, 1024).await;

    let empty = media.accept(multipart("file", "x.png", b"").await, "sliders", UploadKind::Image);
    assert!(matches!(empty.await, Err(MediaError::Rejected { .. })));

    let missing = media.accept(multipart("avatar", "x.png", PNG).await, "sliders", UploadKind::Image);
    assert!(matches!(missing.await, Err(MediaError::Rejected { .. })));
}

#[tokio::test]
async fn oversized_files_are_too_large() {
    let temp = TempDir::new().unwrap();
    let media = library(&temp, 8).await;

    let err = media.accept(multipart("file", "big.png", PNG).await, "sliders", UploadKind::Image).await;
    assert!(matches!(err, Err(MediaError::TooLarge { .. })));

    let status = lobby_kernel::server::ApiError::from(err.unwrap_err()).status();
    assert_eq!(status.as_u16(), 413);
}
