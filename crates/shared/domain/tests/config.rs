use lobby_domain::config::{ApiConfig, DatabaseConfig, ServerConfig, StorageConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());
    assert!(server.cors_origins.is_empty());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "lobby");
    assert_eq!(db.database, "site");
    assert!(db.credentials.is_none());

    let storage = StorageConfig::default();
    assert_eq!(storage.uploads_dir, std::path::PathBuf::from("data/uploads"));
    assert_eq!(storage.static_dir, std::path::PathBuf::from("public"));
    assert!(storage.public_url.is_empty());

    let cfg = ApiConfig::default();
    assert_eq!(cfg.uploads.max_file_size, 5 * 1024 * 1024);
    assert_eq!(cfg.security.password_cost, 12);
    assert_eq!(cfg.security.jwt.ttl_seconds, 86_400);
    assert!(cfg.security.bootstrap_admin.is_none());
    assert_eq!(cfg.log.level, "info");
}

#[test]
fn api_config_deserializes_partial_sections() {
    let raw = json!({
        "server": { "address": "::", "port": 8080, "cors_origins": ["https://admin.example.com"] },
        "database": { "url": "rocksdb://data/db", "namespace": "n", "database": "d" },
        "storage": { "uploads_dir": "/srv/uploads", "public_url": "https://cdn.example.com" },
        "uploads": { "max_file_size": 1024 },
        "security": {
            "jwt": { "secret": "s3cret" },
            "bootstrap_admin": { "username": "root", "password": "changeme1", "name": "Root" }
        }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.cors_origins, ["https://admin.example.com"]);
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.storage.public_url, "https://cdn.example.com");
    assert_eq!(cfg.storage.static_dir, std::path::PathBuf::from("public"));
    assert_eq!(cfg.uploads.max_file_size, 1024);
    assert_eq!(cfg.security.jwt.secret, "s3cret");
    assert_eq!(cfg.security.jwt.issuer, "lobby");
    assert_eq!(cfg.security.bootstrap_admin.as_ref().map(|a| a.name.as_str()), Some("Root"));
}

#[test]
fn clones_share_until_mutated() {
    let original = ApiConfig::default();
    let mut copy = original.clone();
    copy.server.port = 9000;

    assert_eq!(original.server.port, 4583);
    assert_eq!(copy.server.port, 9000);
}
