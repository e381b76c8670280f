use lobby_storage::*;
use tempfile::TempDir;

async fn storage(temp: &TempDir) -> Storage {
    Storage::builder().root(temp.path()).connect().await.expect("storage")
}

#[tokio::test]
async fn traversal_is_rejected() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;
    let sliders = storage.namespace("sliders").unwrap();

    assert!(matches!(
        sliders.write_once("../etc/passwd", b"x").await,
        Err(StorageError::PathTraversalAttempt { .. })
    ));
    assert!(sliders.write_once("foo/../../bar.png", b"x").await.is_err());
    assert!(sliders.write_once("/etc/passwd", b"x").await.is_err());
}

#[tokio::test]
async fn namespaced_files_are_sharded_by_name() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;
    let sliders = storage.namespace("sliders").unwrap();

    let stored = sliders.write_once("9f86d081.png", b"png bytes").await.unwrap();

    assert_eq!(stored.url_path(), "sliders/9f/86/9f86d081.png");
    assert_eq!(stored.size, 9);
    assert!(stored.created);
    let on_disk = std::fs::read(temp.path().join("sliders/9f/86/9f86d081.png")).unwrap();
    assert_eq!(on_disk, b"png bytes");
}

#[tokio::test]
async fn write_once_keeps_the_first_copy() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;
    let logos = storage.namespace("logos").unwrap();

    let first = logos.write_once("c0ffee00.svg", b"<svg/>").await.unwrap();
    let second = logos.write_once("c0ffee00.svg", b"<svg>other</svg>").await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.relative, second.relative);
    assert_eq!(std::fs::read(storage.root().join(&first.relative)).unwrap(), b"<svg/>");
}

#[tokio::test]
async fn no_temp_files_survive_a_write() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;

    let stored = storage.namespace("banners").unwrap().write_once("abcdef.jpg", b"jpg").await.unwrap();

    let shard = storage.root().join(&stored.relative);
    let siblings: Vec<_> = std::fs::read_dir(shard.parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(siblings, vec![std::ffi::OsString::from("abcdef.jpg")]);
}

#[tokio::test]
async fn short_names_are_not_sharded() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;

    let stored = storage.namespace("icons").unwrap().write_once("a.b", b"x").await.unwrap();
    assert_eq!(stored.url_path(), "icons/a.b");
}

#[tokio::test]
async fn invalid_namespaces_are_rejected() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;

    assert!(matches!(storage.namespace(""), Err(StorageError::InvalidNamespace { .. })));
    assert!(matches!(storage.namespace("../up"), Err(StorageError::InvalidNamespace { .. })));
    assert_eq!(storage.namespace("Sliders").unwrap().name(), "sliders");
}

#[tokio::test]
async fn missing_root_without_create_fails() {
    let temp = TempDir::new().unwrap();
    let result = Storage::builder().root(temp.path().join("absent")).create(false).connect().await;
    assert!(matches!(result, Err(StorageError::Io { .. })));
}

#[cfg(unix)]
#[tokio::test]
async fn symlinked_escape_is_rejected() {
    let temp = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let storage = storage(&temp).await;

    std::os::unix::fs::symlink(outside.path(), temp.path().join("escape")).unwrap();

    let result = storage.namespace("escape").unwrap().write_once("file.txt", b"nope").await;
    assert!(matches!(result, Err(StorageError::PathTraversalAttempt { .. })));
}
