//! termhome gateway: the terminal page, its static assets, and `/api/command`.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{Html, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use termhome_core::{escape_html, CommandReply, CommandRequest, CommandTable, HomeConfig, COMMAND_PATH};
use tower_http::services::ServeDir;

const INDEX: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html"));
const PROMPT_PLACEHOLDER: &str = "{{PROMPT}}";

pub struct AppState {
    pub table: CommandTable,
    /// Terminal page with the configured prompt baked in.
    pub page: String,
}

impl AppState {
    pub fn from_config(cfg: &HomeConfig) -> Self {
        Self {
            table: CommandTable::from_config(cfg),
            page: render_page(&cfg.terminal.prompt),
        }
    }
}

/// Fills the prompt label into the embedded page.
pub fn render_page(prompt: &str) -> String {
    INDEX.replace(PROMPT_PLACEHOLDER, &escape_html(prompt))
}

pub fn build_app(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(serve_terminal_ui))
        .route("/health", get(health))
        .route(COMMAND_PATH, post(command_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(axum::middleware::from_fn(log_requests))
}

async fn log_requests(
    connect: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    match connect {
        Some(ConnectInfo(addr)) => tracing::info!(
            %addr, %method, %path, status = response.status().as_u16(), "request"
        ),
        None => tracing::info!(%method, %path, status = response.status().as_u16(), "request"),
    }
    response
}

async fn health() -> &'static str {
    "OK"
}

async fn serve_terminal_ui(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.clone())
}

/// POST /api/command: resolve the line against the configured table.
async fn command_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CommandRequest>,
) -> Json<CommandReply> {
    let reply = state.table.execute(&body.command);
    tracing::info!(command = %body.command.trim(), status = ?reply.status, "command");
    Json(reply)
}
