use axum::ServiceExt;
use axum::extract::Request;
use hr_server::{AppState, Config, api, logger};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // 1. Environment (.env, logging)
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    logger::init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    tracing::info!(environment = %config.environment, "HR server starting");

    let _cleanup = config.log_dir.clone().map(logger::periodic_cleanup);

    // 2. State (database, migrations, bootstrap admin)
    let state = AppState::new(&config).await?;

    // 3. HTTP
    let app = api::build_service(state);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HTTP listening on {addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HR server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
