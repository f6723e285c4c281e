//! `OpenLab` mock API: an in-memory stand-in for the lab management backend.

mod config;
mod routes;
mod seed;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();
    let state = state::AppState::new(&config);
    let app = routes::app(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(
        port = config.port,
        delay_ms = config.api_delay.as_millis(),
        static_dir = ?config.static_dir,
        "openlab mock api listening"
    );
    axum::serve(listener, app).await.expect("server failed");
}
