use std::sync::Arc;

use mivideoteca_api::config::{self, Environment};
use mivideoteca_api::state::AppState;
use mivideoteca_api::store::PgStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config().clone();
    tracing::info!("Starting MiVideoteca API in {:?} mode", config.environment);

    // Test harnesses consume the router from the library without a socket
    if config.environment == Environment::Test {
        tracing::info!("APP_ENV=test: omitiendo el arranque del servidor");
        return;
    }

    let store = PgStore::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("failed to connect database: {}", e));

    let port = config.server.port;
    let state = AppState::new(Arc::new(store), config);
    let app = mivideoteca_api::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Servidor escuchando en el puerto {}", port);

    axum::serve(listener, app).await.expect("server");
}
