mod app;
mod middlewares;
mod routes;
mod services;
mod types;
mod utils;
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();
    info!("Starting app...");

    let config = app::AppConfig::from_env();
    if config.maps_key.is_none() {
        info!("GOOGLE_MAPS_API_KEY not set, Google Places search is disabled");
    }

    let app = app::gen_app(config);

    let address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on {}", address);

    axum::serve(listener, app).await
}
