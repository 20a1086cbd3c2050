//! HTTP surface: `GET /api/program?cinema=<id>&date=YYYY-MM-DD`.

use crate::error::ProgramError;
use crate::program::ProgramService;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Programs change rarely: 5 minutes fresh, 10 more minutes served stale.
pub const CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=600";

#[derive(Debug, Deserialize)]
pub struct ProgramQuery {
    cinema: Option<String>,
    date: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

async fn program_handler(
    State(service): State<Arc<ProgramService>>,
    Query(query): Query<ProgramQuery>,
) -> Result<impl IntoResponse, ProgramError> {
    let (Some(cinema), Some(date)) = (present(&query.cinema), present(&query.date)) else {
        return Err(ProgramError::missing_params());
    };

    let listings = service.run(cinema, date).await?;
    Ok(([(header::CACHE_CONTROL, CACHE_CONTROL)], Json(listings)))
}

async fn cinemas_handler(State(service): State<Arc<ProgramService>>) -> impl IntoResponse {
    Json(service.supported())
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub fn router(service: Arc<ProgramService>) -> Router {
    Router::new()
        .route("/api/program", get(program_handler))
        .route("/api/cinemas", get(cinemas_handler))
        .route("/api/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn serve(bind: SocketAddr, service: Arc<ProgramService>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(%bind, "listening");
    axum::serve(listener, router(service)).await
}
