use anyhow::Context;
use lobby::kernel::config::load_api_config;
use lobby_logger::{LevelFilter, Logger};
use lobby_server::Server;

#[lobby_runtime::main(server)]
async fn main() -> anyhow::Result<()> {
    let cfg = load_api_config(Some("server")).context("Critical: Configuration is malformed")?;

    let level: LevelFilter = cfg
        .log
        .level
        .parse()
        .with_context(|| format!("Unknown log level `{}`", cfg.log.level))?;

    let mut logger = Logger::builder(env!("CARGO_PKG_NAME")).level(level);
    if let Some(filter) = &cfg.log.filter {
        logger = logger.env_filter(filter);
    }
    if let Some(directory) = &cfg.log.directory {
        logger = logger.files(directory, cfg.log.json);
    }
    let _log = logger.init()?;

    Server::builder().config(cfg).build().await?.run().await
}
