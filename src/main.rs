//! Hotel Backend Server
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use hotel_api::AppState;
use hotel_core::config::AppConfig;
use hotel_core::error::AppError;
use hotel_database::{DatabasePool, MemoryStore, Stores};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment.
///
/// `HOTEL_ENV` selects the overlay file under `config/`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("HOTEL_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting hotel backend v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores ───────────────────────────────────────────
    let (stores, db_pool) = match config.database.provider.as_str() {
        "postgres" => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database).await?;
            pool.health_check().await?;

            tracing::info!("Running database migrations...");
            pool.migrate().await?;
            tracing::info!("Database migrations complete");

            (Stores::postgres(&pool), Some(pool))
        }
        _ => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            (Stores::memory(MemoryStore::new()), None)
        }
    };

    // ── Step 2: Email sender ─────────────────────────────────────
    tracing::info!(provider = %config.email.provider, "Initializing email sender...");
    let sender = hotel_mail::create_sender(&config.email)
        .map_err(|e| AppError::configuration(e.to_string()))?;

    // ── Step 3: Services ─────────────────────────────────────────
    let state = AppState::new(config.clone(), stores, sender);

    // ── Step 4: Bootstrap admin ──────────────────────────────────
    if let Some(admin) = &config.auth.bootstrap_admin {
        if state.accounts.bootstrap_admin(admin).await? {
            tracing::info!(email = %admin.email, "Bootstrap admin created");
        }
    }

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app = hotel_api::build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Hotel backend listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("Hotel backend shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
