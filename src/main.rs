use std::process::ExitCode;

use tracing::{error, info};

use files_manager::{AppState, Cache, Config, Database, WebServer};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {CONFIG_PATH}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = files_manager::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        files_manager::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server stopped with error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> files_manager::Result<()> {
    let db = Database::open(&config.database.path, config.database.max_connections).await?;
    let cache = match config.cache.path.as_deref() {
        Some(path) => Cache::open(path).await?,
        None => Cache::open_in_memory().await?,
    };
    info!(
        "Blob storage at {}, sessions live {}s",
        config.files.folder_path, config.session.ttl_secs
    );

    let state = AppState::from_config(&config, db.clone(), cache.clone());
    let server = WebServer::new(&config, state)?;
    info!("Server configured on {}", server.addr());

    let result = server.run().await;

    cache.close().await;
    db.close().await;
    info!("Connections closed");

    result.map_err(Into::into)
}
