//! chirp server
//!
//! Minimal social-posting backend: user sign-up and tweet CRUD over a
//! document store.

use chirp::core::AppState;
use chirp::{api, store, Config, Result};
use clap::{Arg, Command};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("chirp")
        .version(chirp::VERSION)
        .about("Minimal social-posting backend.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("listen-addr")
                .long("listen-addr")
                .value_name("ADDR")
                .help("HTTP server bind address"),
        )
        .arg(
            Arg::new("database-url")
                .long("database-url")
                .value_name("URL")
                .help("Document store connection string"),
        )
        .arg(
            Arg::new("store-backend")
                .long("store-backend")
                .value_name("TYPE")
                .help("Store backend type (memory, mongodb)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .get_matches();

    // Load configuration; a bad or incomplete config must never reach the
    // listener, so this exits before anything else starts.
    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("chirp: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging (RUST_LOG wins over the configured level)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("starting {} v{}", chirp::NAME, chirp::VERSION);

    // Startup sequencing: the store handle is acquired and verified before
    // the listener binds, so no request can arrive ahead of it.
    let store = match store::create_store(&config.store).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize document store");
            std::process::exit(1);
        }
    };
    info!("store initialized: {:?}", config.store.backend);

    let addr = config.listen_addr()?;
    let config = Arc::new(config);
    let state = AppState::new(store, config);

    api::start_server(addr, state).await
}

/// Load configuration and apply command line overrides
fn load_config(matches: &clap::ArgMatches) -> Result<Config> {
    let mut config = if let Some(config_path) = matches.get_one::<String>("config") {
        let mut config = Config::from_file(config_path)?;
        config.apply_env_overrides()?;
        config
    } else {
        Config::load()?
    };

    if let Some(addr) = matches.get_one::<String>("listen-addr") {
        config.server.listen_addr = Some(
            addr.parse()
                .map_err(|e| chirp::Error::config(format!("invalid listen address: {}", e)))?,
        );
    }

    if let Some(url) = matches.get_one::<String>("database-url") {
        config.store.url = Some(url.clone());
    }

    if let Some(backend) = matches.get_one::<String>("store-backend") {
        config.store.backend = backend.parse()?;
    }

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    config.validate()?;
    Ok(config)
}
