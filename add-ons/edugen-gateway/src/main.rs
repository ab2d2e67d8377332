//! EduGen Gateway — single-page article generator.
//! Run: cargo run -p edugen-gateway, then open http://127.0.0.1:8000

use std::net::SocketAddr;

use edugen_core::EduGenConfig;
use edugen_gateway::{build_router, telemetry, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[edugen-gateway] .env not loaded: {} (using system environment)", e);
    }

    let config = EduGenConfig::load()?;
    let _log_guard = telemetry::init(config.log_dir.as_deref());

    let bind_addr = config.bind_addr();
    let state = AppState::from_config(config);
    tracing::info!(
        app = %state.config.app_name,
        backend = state.generator.backend_name(),
        delay_ms = state.config.generation_delay_ms,
        version = edugen_core::version(),
        "EduGen gateway starting"
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("EduGen gateway listening on http://{}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
