use std::time::Duration;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use portfolio_content_api::{
    background_task::start_invalidation_worker,
    cache::{page_cache_from_config, InvalidationQueue},
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::AppConfig,
    web::build_cors,
    AppState,
};

const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Failed to load configuration")?;
    init_tracing(config.is_production());
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to apply database migrations")?;

    let page_cache = page_cache_from_config(&config)
        .context("Failed to set up the page cache backend")?;
    let cache_backend = page_cache.backend();

    let (invalidation, receiver) = InvalidationQueue::channel();
    let worker = tokio::spawn(start_invalidation_worker(receiver, page_cache));

    let app_state = web::Data::new(AppState::new(pool.clone(), invalidation, cache_backend));
    let cors_origins = config.cors_origins();
    let server_addr = config.server_addr();

    tracing::info!(
        "🚀 Starting {} v{} on {} ({} workers)",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.worker_count
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .disable_signals()
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        let reason = shutdown_signal().await;
        tracing::info!("Stopping HTTP server after {}", reason);
        handle.stop(true).await;
    });

    server.await.context("HTTP server error")?;

    // Dropping the app state closes the queue, which lets the worker finish its backlog.
    match tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await {
        Ok(Err(e)) => tracing::warn!("Invalidation worker ended abnormally: {}", e),
        Err(_) => tracing::warn!("Invalidation worker still busy, pending pages stay stale"),
        Ok(Ok(())) => {}
    }
    pool.close().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
