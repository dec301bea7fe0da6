use crate::{
    error::ApiError,
    models::{HealthResponse, Record, ShortenRequest, ShortenResponse},
    validate, AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

/// GET /
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "URL Shortener API",
    })
}

/// POST /api/shorten
///
/// Validates the submitted URL, then asks the store for its code. A URL that
/// was shortened before gets its existing code back with 200; a new one gets
/// 201.
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), ApiError> {
    // Any unreadable body is reported the same way as a missing `url` key
    let Json(request) = payload.map_err(|e| {
        tracing::debug!("Rejected shorten payload: {}", e);
        ApiError::MissingUrl
    })?;

    let url = match request.url {
        None => return Err(ApiError::MissingUrl),
        Some(serde_json::Value::String(url)) => url,
        Some(_) => return Err(ApiError::InvalidUrl),
    };

    if !validate::is_valid_url(&url) {
        return Err(ApiError::InvalidUrl);
    }

    let outcome = state.store.shorten(&url).await;
    let status = if outcome.is_created() {
        tracing::info!("Shortened {} -> {}", url, outcome.code());
        StatusCode::CREATED
    } else {
        tracing::debug!("{} already shortened as {}", url, outcome.code());
        StatusCode::OK
    };

    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    let short_code = outcome.into_code();
    let short_url = format!("{}/{}", state.config.public_base(host), short_code);

    Ok((
        status,
        Json(ShortenResponse {
            short_code,
            short_url,
        }),
    ))
}

/// GET /api/stats/:code
///
/// Read-only: looking at the stats never counts as a click.
pub async fn stats(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let record = state.store.get_stats(&code).await?;
    Ok(Json(record))
}
