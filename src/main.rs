//! RNE Chat Hub - API server entry point
//!
//! Run with: PORT=3001 cargo run
//! Set UPSTREAM_API_URL to put the remote chat service in front of the
//! in-memory store; without it the hub serves mock data only.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use rne_chat_hub::gateway::{ChatGateway, FallbackGateway, MockGateway, RemoteGateway};
use rne_chat_hub::handlers::{
    AppState, create_session_handler, current_user_handler, delete_session_handler,
    generate_handler, get_session_handler, list_messages_handler, list_sessions_handler,
    processing_steps_handler, send_message_handler, update_session_handler, update_user_handler,
};
use rne_chat_hub::i18n::Language;
use rne_chat_hub::infrastructure::{UpstreamClient, UserDirectory, demo_store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting RNE Chat Hub API server...");

    // Read port from environment (default: 3001)
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let language = std::env::var("CHAT_LANGUAGE")
        .map(|code| Language::parse_or_default(&code))
        .unwrap_or_default();

    // One store per process, injected into whichever gateway we build.
    let store = Arc::new(demo_store().await);

    let gateway: Arc<dyn ChatGateway> = match std::env::var("UPSTREAM_API_URL") {
        Ok(base_url) if !base_url.is_empty() => {
            tracing::info!(upstream = %base_url, "Upstream configured, remote-with-fallback mode");
            let remote = RemoteGateway::new(UpstreamClient::new(base_url), Arc::clone(&store));
            Arc::new(FallbackGateway::new(remote, MockGateway::new(store)))
        }
        _ => {
            tracing::info!("No upstream configured, serving mock data");
            Arc::new(MockGateway::new(store))
        }
    };

    let state = AppState {
        gateway,
        users: Arc::new(UserDirectory::with_demo_users()),
        language,
    };

    // NOTE: Axum 0.8 uses {param} syntax instead of :param
    let app = Router::new()
        .route(
            "/api/chat-sessions",
            get(list_sessions_handler).post(create_session_handler),
        )
        .route(
            "/api/chat-sessions/{id}",
            get(get_session_handler)
                .patch(update_session_handler)
                .delete(delete_session_handler),
        )
        .route(
            "/api/messages",
            get(list_messages_handler).post(send_message_handler),
        )
        .route("/api/ai/generate", post(generate_handler))
        .route("/api/processing-steps", get(processing_steps_handler))
        .route(
            "/api/users/me",
            get(current_user_handler).patch(update_user_handler),
        )
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
