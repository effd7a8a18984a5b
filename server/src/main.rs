mod db;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()
        .expect("invalid PORT");

    let jwt = services::token::JwtKeys::from_env().expect("JWT_SECRET required");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Chat providers are optional: without keys the chatbot serves its
    // offline fallback replies.
    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(models = %client.models(), "chat providers initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "chat providers not configured — chatbot will use fallback replies");
            None
        }
    };

    // Hotel lookups are optional likewise.
    let travel = match services::travel::TravelApi::from_env() {
        Some(api) => Some(Arc::new(api)),
        None => {
            tracing::warn!("RAPIDAPI_KEY not set — hotel lookups disabled");
            None
        }
    };

    let state = state::AppState::new(pool, jwt, llm, travel);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "travel platform API listening");
    axum::serve(listener, app).await.expect("server failed");
}
