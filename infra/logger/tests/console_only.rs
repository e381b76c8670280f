use lobby_logger::{LevelFilter, Logger};

#[test]
fn console_only_logger_creates_no_files() {
    let cwd_before: Vec<_> = std::fs::read_dir(".").expect("cwd").flatten().map(|e| e.file_name()).collect();

    let _logger = Logger::builder("lobby-console-only")
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");
    tracing::info!(table = "navbar_color", "console logging works");

    let cwd_after: Vec<_> = std::fs::read_dir(".").expect("cwd").flatten().map(|e| e.file_name()).collect();
    assert_eq!(cwd_before.len(), cwd_after.len());
}
