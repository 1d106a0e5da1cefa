mod db;
mod llm;
mod model;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Initialize the Gemini client (non-fatal: AI features disabled if
    // config is missing).
    let generation = match llm::GeminiClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "Gemini client initialized");
            Some(Arc::new(client) as Arc<dyn llm::GenerateJson>)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Gemini client not configured — AI features disabled");
            None
        }
    };

    let state = state::AppState::new(pool, generation);

    // Hydrate the in-memory trip collection before accepting traffic.
    services::trip::initialize(&state).await;

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "travelwise listening");
    axum::serve(listener, app).await.expect("server failed");
}
