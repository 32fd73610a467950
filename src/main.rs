//! Server binary: env settings, pool and schema, routes, serve.

use axum::extract::Request;
use axum::ServiceExt;
use campus_api::{app, connect, ensure_schema, AppConfig, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("campus_api=info")),
        )
        .init();

    let config = AppConfig::from_env();
    let pool = connect(&config.database_url).await?;
    ensure_schema(&pool).await?;

    let app = app(AppState { pool });
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
