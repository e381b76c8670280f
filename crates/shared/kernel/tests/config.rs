use lobby_domain::config::{ApiConfig, BootstrapAdmin};
use lobby_kernel::config::{ConfigError, load_api_config, validate_config};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = load_api_config(Some("definitely/not/here")).expect("defaults");
    assert_eq!(config.server.port, 4583);
    assert_eq!(config.database.url, "mem://");
}

#[test]
fn file_values_override_defaults() {
    let file = write_config(
        r#"
        [server]
        port = 8080

        [database]
        namespace = "casino"

        [uploads]
        max_file_size = 1024
        "#,
    );

    let config = load_api_config(Some(file.path())).expect("file config");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.namespace, "casino");
    assert_eq!(config.database.database, "site");
    assert_eq!(config.uploads.max_file_size, 1024);
}

#[test]
fn validation_rejects_unusable_settings() {
    let mut config = ApiConfig::default();
    assert!(validate_config(&config).is_ok());

    config.security.jwt.secret = "  ".into();
    assert!(matches!(validate_config(&config), Err(ConfigError::Invalid { .. })));

    let mut config = ApiConfig::default();
    config.security.password_cost = 3;
    assert!(validate_config(&config).is_err());

    let mut config = ApiConfig::default();
    config.uploads.max_file_size = 0;
    assert!(validate_config(&config).is_err());

    let mut config = ApiConfig::default();
    config.security.bootstrap_admin =
        Some(BootstrapAdmin { username: "root".into(), password: String::new(), name: "Root".into() });
    assert!(validate_config(&config).is_err());
}
