//! # Lobby Server
//!
//! The HTTP front of Lobby: the JSON API under `/api`, stored uploads under `/uploads`, the
//! API reference under `/docs` and the static site bundles as fallback.
//!
//! ## Example
//! ```no_run
//! use lobby_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = Server::builder().port(4583).build().await?;
//!     server.run().await
//! }
//! ```

mod router;

use anyhow::{Context, Result, bail};
use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use lobby::domain::config::{ApiConfig, SslConfig};
use lobby::kernel::config::validate_config;
use lobby::kernel::server::ApiState;
use lobby::kernel::server::router::mark_started;
use lobby_database::Database;
use lobby_storage::Storage;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// In-flight requests get this long to finish after a shutdown signal.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Collects the configuration a [`Server`] is assembled from.
#[must_use = "a ServerBuilder does nothing until .build() is awaited"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Overrides `server.port`.
    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    async fn open_database(&self) -> Result<Database> {
        let settings = &self.cfg.database;
        let mut database = Database::builder()
            .url(&settings.url)
            .session(&settings.namespace, &settings.database)
            .migrations(lobby::migrations());

        if let Some(root) = &settings.credentials {
            database = database.auth(&root.username, &root.password);
        }

        database
            .init()
            .await
            .with_context(|| format!("Cannot open database at {}", settings.url))
    }

    async fn open_storage(&self) -> Result<Storage> {
        let uploads = &self.cfg.storage.uploads_dir;
        Storage::builder()
            .root(uploads)
            .connect()
            .await
            .with_context(|| format!("Cannot open uploads directory {}", uploads.display()))
    }

    fn check_tls_files(&self) -> Result<()> {
        let Some(tls) = &self.cfg.server.ssl else {
            return Ok(());
        };

        for (what, path) in [("certificate", &tls.cert), ("private key", &tls.key)] {
            if !path.is_file() {
                bail!("TLS {what} missing: {}", path.display());
            }
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if tls.key.metadata()?.permissions().mode() & 0o077 != 0 {
                warn!(key = %tls.key.display(), "TLS private key is readable by group or others");
            }
        }

        Ok(())
    }

    /// Validates the configuration, opens storage and database, seeds the bootstrap admin and
    /// registers the feature slices.
    ///
    /// # Errors
    /// * Invalid settings (empty JWT secret, zero upload size, bcrypt cost outside 4..=31)
    /// * Missing TLS certificate or key
    /// * An unusable uploads directory
    /// * Database connection or migration failures
    pub async fn build(self) -> Result<Server> {
        validate_config(&self.cfg).context("Invalid configuration")?;
        self.check_tls_files()?;

        let storage = self.open_storage().await?;
        let database = self.open_database().await?;

        lobby::bootstrap(&self.cfg, &database).await.context("Seeding the bootstrap admin failed")?;
        let slices = lobby::init(&self.cfg, &storage).context("Feature initialization failed")?;

        let state = ApiState::builder()
            .config(self.cfg)
            .db(database)
            .storage(storage)
            .register_slices(slices)
            .build()
            .context("Cannot assemble the API state")?;

        mark_started();
        info!(slices = ?state.slice_names(), "Server assembled");
        Ok(Server { state })
    }
}

/// An assembled server: state is ready, no socket is bound yet.
#[must_use = "a Server does nothing until .run() is awaited"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The complete application router, for serving or for driving in tests.
    pub fn app(&self) -> Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Binds `server.address:server.port` and serves until SIGINT or SIGTERM, then drains.
    ///
    /// # Errors
    /// Fails when the TLS material cannot be loaded or the address cannot be bound.
    pub async fn run(self) -> Result<()> {
        let settings = self.state.config.server.clone();
        let address = SocketAddr::new(settings.address, settings.port);
        let service = self.app().into_make_service();

        let handle = Handle::<SocketAddr>::new();
        tokio::spawn(drain_on_signal(handle.clone()));

        match &settings.ssl {
            Some(tls) => {
                let tls = load_tls(tls).await?;
                info!(%address, "Listening on https://{address}");
                axum_server::bind_rustls(address, tls)
                    .handle(handle)
                    .serve(service)
                    .await
                    .context("HTTPS listener stopped with an error")?;
            },
            None => {
                info!(%address, "Listening on http://{address}");
                axum_server::bind(address)
                    .handle(handle)
                    .serve(service)
                    .await
                    .context("HTTP listener stopped with an error")?;
            },
        }

        info!("Server stopped");
        Ok(())
    }
}

async fn load_tls(tls: &SslConfig) -> Result<RustlsConfig> {
    RustlsConfig::from_pem_file(&tls.cert, &tls.key)
        .await
        .with_context(|| format!("Cannot load TLS material from {}", tls.cert.display()))
}

async fn drain_on_signal(handle: Handle<SocketAddr>) {
    match shutdown_signal().await {
        Ok(()) => {
            info!(timeout = ?DRAIN_TIMEOUT, "Shutdown requested, draining connections");
            handle.graceful_shutdown(Some(DRAIN_TIMEOUT));
        },
        Err(e) => error!("Shutdown signal listener failed: {e:#}"),
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() -> Result<()> {
    let interrupt = async { signal::ctrl_c().await.context("Ctrl+C handler unavailable") };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("SIGTERM handler unavailable")?;
        sigterm.recv().await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = interrupt => res,
        res = terminate => res,
    }
}
