//! PivotPoint server binary.
//!
//! Loads configuration, installs the tracing subscriber, wires the
//! repositories (Postgres, or in memory when no database is configured
//! outside production) and serves the HTTP API until Ctrl+C.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use pivot_point::adapters::http::{build_router, AppState, HttpSettings};
use pivot_point::adapters::{
    InMemoryDecisionRepository, InMemoryUserRepository, JwtTokenService,
    PostgresDecisionRepository, PostgresUserRepository,
};
use pivot_point::config::{AppConfig, DatabaseConfig, ServerConfig};
use pivot_point::ports::{DecisionRepository, UserRepository};

type Repositories = (Arc<dyn DecisionRepository>, Arc<dyn UserRepository>);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let (decisions, users) = repositories(&config.database).await?;

    let tokens = Arc::new(JwtTokenService::new(&config.auth.jwt_config()));
    let state = AppState::new(decisions, users, tokens.clone(), tokens);

    let settings = HttpSettings {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    };
    let app = build_router(state, &settings);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "PivotPoint listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// `RUST_LOG` wins over `server.log_level`. Production logs JSON lines.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn repositories(database: &DatabaseConfig) -> Result<Repositories, Box<dyn std::error::Error>> {
    if !database.is_configured() {
        tracing::warn!("no database configured, data is kept in memory only");
        let decisions: Arc<dyn DecisionRepository> = Arc::new(InMemoryDecisionRepository::new());
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        return Ok((decisions, users));
    }

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .max_lifetime(database.max_lifetime())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let decisions: Arc<dyn DecisionRepository> =
        Arc::new(PostgresDecisionRepository::new(pool.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool));
    Ok((decisions, users))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
