//! VIP lifecycle service entry point.

use std::path::Path;
use std::sync::Arc;

use sqlx::migrate::Migrator;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vip_lifecycle::adapters::auth::{JwtConfig, JwtSessionValidator};
use vip_lifecycle::adapters::http::{api_router, AuthState, HttpSettings, MembershipAppState};
use vip_lifecycle::adapters::membership::ProfileRoleAuthorizer;
use vip_lifecycle::adapters::{
    InMemoryProfileStore, PostgresProfileStore, RestProfileStore, RestStoreConfig, SystemClock,
};
use vip_lifecycle::application::{spawn_sweep_scheduler, SweepExpiredHandler};
use vip_lifecycle::config::{AppConfig, StoreBackend};
use vip_lifecycle::ports::{Clock, ProfileStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let store = build_store(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let state = MembershipAppState {
        profile_store: store.clone(),
        clock: clock.clone(),
        admin_authorizer: Arc::new(ProfileRoleAuthorizer::new(store.clone())),
    };
    let validator: AuthState = Arc::new(JwtSessionValidator::new(JwtConfig {
        secret: config.auth.jwt_secret.clone(),
        audience: config.auth.audience.clone(),
        leeway_secs: config.auth.leeway_secs,
    }));
    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };

    let sweeper = match config.sweep.interval() {
        Some(period) => Some(spawn_sweep_scheduler(
            Arc::new(SweepExpiredHandler::new(store, clock)),
            period,
        )),
        None => {
            info!("Background sweep disabled");
            None
        }
    };

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, backend = ?config.store.backend, "VIP lifecycle service listening");

    axum::serve(listener, api_router(state, validator, &settings))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = sweeper {
        task.abort();
    }
    info!("Shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn build_store(config: &AppConfig) -> Result<Arc<dyn ProfileStore>, BoxError> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let pool = config
                .database
                .pool_options()
                .connect(&config.database.url)
                .await?;
            if config.database.run_migrations {
                Migrator::new(Path::new("./migrations")).await?.run(&pool).await?;
                info!("Database migrations applied");
            }
            Ok(Arc::new(PostgresProfileStore::new(pool)))
        }
        StoreBackend::Rest => {
            let store = RestProfileStore::new(RestStoreConfig {
                base_url: config.rest.base_url.clone(),
                service_key: config.rest.service_key.clone(),
                timeout: config.rest.timeout(),
            })?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory profile store; data is lost on restart");
            Ok(Arc::new(InMemoryProfileStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
