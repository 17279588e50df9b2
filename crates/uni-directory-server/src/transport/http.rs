//! HTTP transport — the explore API and /health.

#[cfg(feature = "http")]
use std::sync::Arc;
#[cfg(feature = "http")]
use std::time::Instant;

#[cfg(feature = "http")]
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as AxumJson, Response},
    routing::get,
    Router,
};
#[cfg(feature = "http")]
use tower::ServiceBuilder;
#[cfg(feature = "http")]
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[cfg(feature = "http")]
use uni_directory::UniversityDirectory;

#[cfg(feature = "http")]
use crate::api::{explore, ExploreParams};
#[cfg(feature = "http")]
use crate::types::{ApiError, ApiResult, ExploreResponse};

/// Shared server state passed to all handlers via axum State.
#[cfg(feature = "http")]
pub struct ServerState {
    pub directory: Arc<UniversityDirectory>,
    pub started_at: Instant,
}

#[cfg(feature = "http")]
impl ServerState {
    pub fn new(directory: UniversityDirectory) -> Self {
        Self {
            directory: Arc::new(directory),
            started_at: Instant::now(),
        }
    }
}

/// HTTP transport serving the directory to browsing clients.
#[cfg(feature = "http")]
pub struct HttpTransport {
    state: Arc<ServerState>,
}

#[cfg(feature = "http")]
impl HttpTransport {
    pub fn new(directory: UniversityDirectory) -> Self {
        Self {
            state: Arc::new(ServerState::new(directory)),
        }
    }

    /// Run the HTTP server on the given address.
    pub async fn run(&self, addr: &str) -> ApiResult<()> {
        let app = router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("HTTP transport listening on http://{addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| ApiError::InternalError(e.to_string()))?;

        Ok(())
    }
}

/// Build the axum Router with all endpoints.
#[cfg(feature = "http")]
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/explore", get(handle_explore))
        .route("/health", get(handle_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(feature = "http")]
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            tracing::debug!("{self}");
        } else {
            tracing::error!("Explore universities error: {self}");
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, AxumJson(self.to_body())).into_response()
    }
}

/// Lookup or search. Dataset reads happen on the blocking pool; a panic
/// there surfaces as a generic internal error.
///
/// The query is taken as raw pairs so a repeated key resolves to its first
/// value instead of rejecting the request.
#[cfg(feature = "http")]
async fn handle_explore(
    State(state): State<Arc<ServerState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<AxumJson<ExploreResponse>, ApiError> {
    let directory = state.directory.clone();
    let params = ExploreParams::from_pairs(pairs);

    let response = tokio::task::spawn_blocking(move || explore(&directory, &params))
        .await
        .map_err(|e| ApiError::InternalError(format!("explore task failed: {e}")))??;

    Ok(AxumJson(response))
}

/// Health check endpoint.
#[cfg(feature = "http")]
async fn handle_health(State(state): State<Arc<ServerState>>) -> AxumJson<serde_json::Value> {
    let directory = &state.directory;
    AxumJson(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs_f64(),
        "countries": directory.catalog().len(),
        "cached_countries": directory.cache().len(),
        "cached": directory.cache().cached_codes(),
    }))
}
