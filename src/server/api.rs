use crate::agent::ChatBot;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use axum::{
    routing::{ get, post },
    Router,
    Json,
    body::Bytes,
    extract::State,
    response::{ Html, IntoResponse, Response },
    http::StatusCode,
};
use serde::{ Deserialize, Serialize };
use tower_http::cors::{ Any, CorsLayer };
use log::info;

const CHAT_PAGE: &str = include_str!("chat.html");

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Serialize)]
struct ClearResponse {
    success: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Clone)]
pub struct AppState {
    agent: Arc<Mutex<ChatBot>>,
}

pub async fn start_http_server(
    addr: &str,
    agent: Arc<Mutex<ChatBot>>
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    info!("Starting HTTP server on: http://{}", addr);

    let app = router(AppState { agent });
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/chat", post(chat_handler))
        .route("/clear", post(clear_handler))
        .layer(cors)
        .with_state(state)
}

impl AppState {
    pub fn new(agent: Arc<Mutex<ChatBot>>) -> Self {
        Self { agent }
    }
}

async fn index_handler() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

async fn chat_handler(State(state): State<AppState>, body: Bytes) -> Response {
    // Absent, malformed, and message-less bodies all land on the same
    // in-band 400 rather than an extractor rejection.
    let message = serde_json
        ::from_slice::<ChatRequest>(&body)
        .ok()
        .and_then(|request| request.message)
        .unwrap_or_default();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: "No message provided".to_string() }),
        ).into_response();
    }

    let mut agent = state.agent.lock().await;
    let response = agent.get_response(&message).await;
    (StatusCode::OK, Json(ChatResponse { response })).into_response()
}

async fn clear_handler(State(state): State<AppState>) -> Response {
    let mut agent = state.agent.lock().await;
    agent.clear();
    (StatusCode::OK, Json(ClearResponse { success: true })).into_response()
}
