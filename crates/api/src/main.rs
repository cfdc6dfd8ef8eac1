use std::sync::Arc;

use anyhow::Context;
use tenantgate_api::{
    auth::ExtensionAuthenticator,
    config::{Config, LogFormat},
    routes::create_router,
    store::{CachedTenantStore, PgTenantStore, TenantStore},
    AppState, TenantCache,
};
use tenantgate_shared::{create_pool, run_migrations};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format);

    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let pg_store: Arc<dyn TenantStore> = Arc::new(PgTenantStore::new(pool));
    let store: Arc<dyn TenantStore> = if config.tenant_cache_ttl.is_zero() {
        pg_store
    } else {
        let cache = Arc::new(TenantCache::new(config.tenant_cache_ttl));
        spawn_cache_cleanup(cache.clone(), config.tenant_cache_ttl);
        Arc::new(CachedTenantStore::new(pg_store, cache))
    };

    tracing::info!(
        host_mode = ?config.host_mode,
        base_domain = %config.base_domain,
        login_host = %config.login_host,
        "Starting tenantgate"
    );

    let bind_address = config.bind_address.clone();
    let state = AppState::new(config, store, Arc::new(ExtensionAuthenticator));
    let app = create_router(state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tenantgate_api=debug,tower_http=info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Periodically drop expired cache slots
fn spawn_cache_cleanup(cache: Arc<TenantCache>, ttl: std::time::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ttl);
        loop {
            interval.tick().await;
            let removed = cache.purge_expired();
            if removed > 0 {
                tracing::debug!(removed, "Purged expired tenant cache slots");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
