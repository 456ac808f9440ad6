//! Path-based HTTP redirector.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ listener ─▶ request id / trace / timeout
//!                                        │
//!                                        ▼
//!                          document redirects (YAML / JSON)
//!                                        │ miss
//!                                        ▼
//!                          inline redirects (settings file)
//!                                        │ miss
//!                                        ▼
//!                          default fallback ("/" greeting, 404)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use redirector::config::validation::validate_config;
use redirector::config::{load_config, ConfigError, RedirectorConfig};
use redirector::lifecycle::{signals, startup, Shutdown};
use redirector::observability::{logging, metrics};
use redirector::HttpServer;

#[derive(Parser)]
#[command(name = "redirector")]
#[command(about = "Redirect request paths to URLs listed in a YAML or JSON document", long_about = None)]
struct Cli {
    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Redirect document (list of `path`/`url` records). Overrides `redirects.file`.
    #[arg(short, long)]
    redirects: Option<PathBuf>,

    /// Bind address. Overrides `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level. Overrides `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut RedirectorConfig) {
        if let Some(file) = self.redirects {
            config.redirects.file = Some(file);
            config.redirects.format = None;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
    }

    /// Settings file (or defaults), overridden by flags, then validated.
    fn resolve_config(self) -> Result<RedirectorConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RedirectorConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().resolve_config()?;

    logging::init_logging(&config.observability);
    tracing::info!("redirector v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let document = startup::load_document_redirects(&config.redirects)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, document);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
