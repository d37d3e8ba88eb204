use axum::extract::DefaultBodyLimit;
use prep_evaluator::{
    build_router,
    config::{get_config, init_config},
    middleware::cors::permissive_cors,
    AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    init_config()?;
    let config = get_config()?;

    let app_state = AppState::new(config)?;

    {
        let cache = app_state.answer_evaluator.cache().clone();
        let period = Duration::from_secs(config.eval_cache_sweep_secs.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let purged = cache.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, remaining = cache.len(), "Evaluation cache swept");
                }
            }
        });
    }

    let app = build_router(app_state)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
