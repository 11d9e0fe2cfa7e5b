#![forbid(unsafe_code)]
use anyhow::Result;
use campaign_intake::{api, config::Config, IntakeDesk, WebhookClient};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // a missing .env is fine, the variables may come from the environment
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting server");
    info!("Forwarding bookings to: {}", config.webhook_url);

    let desk = Arc::new(IntakeDesk::new(WebhookClient::new(config.webhook_url)));
    let mut app = api::router(desk);

    if let Some(frontend_dir) = config.frontend_dir {
        info!("Serving frontend from: {}", frontend_dir.display());
        app = app.fallback_service(ServeDir::new(frontend_dir));
    }

    // run our app with hyper, listening globally on the configured port
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
