mod api;
mod middleware;
mod refresh;
mod scheduler;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(dropsight_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = dropsight_db::PoolConfig::from_app_config(&config);
    let pool = dropsight_db::connect_pool(&config.database_url, pool_config).await?;
    dropsight_db::run_migrations(&pool).await?;

    let products = Arc::new(dropsight_core::load_products(&config.products_path)?.products);
    tracing::info!(products = products.len(), "tracking products");

    let client =
        dropsight_sources::build_client(config.source_timeout_secs, &config.source_user_agent)?;
    let sources = Arc::new(dropsight_sources::SourceConfig::from_app_config(&config));

    let state = AppState {
        pool,
        config: Arc::clone(&config),
        products,
        client,
        sources,
        cycle_gate: Arc::new(Mutex::new(())),
    };

    let _scheduler = scheduler::build_scheduler(state.clone()).await?;

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
