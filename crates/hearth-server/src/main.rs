use std::sync::Arc;

use anyhow::{Context, Result};
use hearth_config::ServerConfig;
use hearth_server::AppState;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_filter())),
        )
        .compact()
        .init();

    let bind_addr = config.bind_addr.clone();
    let model_path = config.model_path.clone();

    let state = AppState::load(config).map_err(|e| {
        error!("Failed to load model from {}: {}", model_path.display(), e);
        e
    });
    let state = Arc::new(
        state.with_context(|| format!("cannot start without a model ({})", model_path.display()))?,
    );

    if state.config.diagnostics {
        log_diagnostics(&state);
    }

    let app = hearth_server::app(state);

    info!("Starting server on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn log_diagnostics(state: &AppState) {
    let info = &state.info;
    match std::env::current_dir() {
        Ok(cwd) => debug!("Working directory: {}", cwd.display()),
        Err(e) => debug!("Working directory unavailable: {}", e),
    }
    debug!(
        "Model file: {} ({} bytes, sha256 {})",
        state.config.model_path.display(),
        info.size_bytes.unwrap_or(0),
        info.sha256.as_deref().unwrap_or("-")
    );
    if let (Some(coefficients), Some(intercept)) = (&info.coefficients, info.intercept) {
        for (name, coef) in info.features.iter().zip(coefficients) {
            debug!("  {:<10} {:>12.6}", name, coef);
        }
        debug!("  intercept  {:>12.6}", intercept);
    }
    debug!("Embedded assets: {:?}", hearth_web::asset_names());
    info!("Diagnostics enabled: GET /diagnose, GET /test");
}
