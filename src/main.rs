use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use savings_gateway::adapters::http::{app_router, with_middleware, AppState, EnvCheck, HttpSettings};
use savings_gateway::adapters::postgres::{
    PostgresLedgerRepository, PostgresSavingsPlanRepository, PostgresUserRepository, MIGRATOR,
};
use savings_gateway::adapters::{CryptomusConfig, CryptomusPaymentAdapter, InMemoryStore};
use savings_gateway::config::{AppConfig, DatabaseConfig, ServerConfig, StorageBackend};
use savings_gateway::ports::{LedgerRepository, SavingsPlanRepository, UserRepository};

type Repositories = (
    Arc<dyn UserRepository>,
    Arc<dyn SavingsPlanRepository>,
    Arc<dyn LedgerRepository>,
);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }
    for setting in config.payment.missing_secrets() {
        tracing::warn!(setting, "Payment secret not configured");
    }

    let (users, plans, ledger) = build_repositories(&config.database).await?;

    let gateway = CryptomusPaymentAdapter::new(
        CryptomusConfig::new(
            config.payment.merchant_id.clone(),
            config.payment.api_key.clone(),
            config.payment.public_base_url.clone(),
        )
        .with_base_url(config.payment.api_base_url.clone())
        .with_lifetime_secs(config.payment.payment_lifetime_secs),
    );

    let state = AppState {
        users,
        plans,
        ledger,
        gateway: Arc::new(gateway),
        webhook_secret: config.payment.webhook_secret.clone(),
        env_check: EnvCheck::from_config(&config),
    };
    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.allowed_origins(),
    };
    let app = with_middleware(app_router(state), &settings);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn build_repositories(config: &DatabaseConfig) -> Result<Repositories, Box<dyn Error>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let store = InMemoryStore::new();
            Ok((
                Arc::new(store.users()),
                Arc::new(store.plans()),
                Arc::new(store.ledger()),
            ))
        }
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .min_connections(config.pool.min_connections)
                .max_connections(config.pool.max_connections)
                .acquire_timeout(config.pool.acquire_timeout())
                .idle_timeout(config.pool.idle_timeout())
                .max_lifetime(config.pool.max_lifetime())
                .connect(&config.url)
                .await?;

            if config.run_migrations {
                MIGRATOR.run(&pool).await?;
                tracing::info!("Database migrations applied");
            }

            Ok((
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresSavingsPlanRepository::new(pool.clone())),
                Arc::new(PostgresLedgerRepository::new(pool)),
            ))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
