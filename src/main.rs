use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &brochure::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        bind_addr = %cfg.bind_addr,
        database_url = %cfg.database_url,
        session_ttl_secs = cfg.session_ttl_secs,
        loglevel = %cfg.loglevel
    );

    let pool = brochure::db::connect(&cfg.database_url).await?;
    let storage = brochure::db::SiteStorage::new(pool);
    storage.init_schema().await?;

    let sessions = brochure::service::sessions::SessionRegistry::new(
        storage.clone(),
        chrono::Duration::seconds(cfg.session_ttl_secs as i64),
    );
    sessions.spawn_sweeper(std::time::Duration::from_secs(cfg.effective_sweep_secs()));

    let state = brochure::router::BrochureState::new(
        storage,
        sessions,
        Arc::from(cfg.setup_key.as_str()),
        cfg.effective_bcrypt_cost(),
    );
    let mut app = brochure::router::brochure_router(state);
    if let Some(dir) = cfg.static_dir.as_ref() {
        info!(path = %dir.display(), "serving static assets");
        app = brochure::router::spa_fallback(app, dir);
    }

    let listener = TcpListener::bind(&cfg.bind_addr).await?;
    info!("HTTP server listening on {}", cfg.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
