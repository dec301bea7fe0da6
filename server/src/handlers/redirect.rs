use crate::{error::ApiError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use url::Url;

/// GET /:code
///
/// 1. Resolve the short code; the store counts the click in the same step.
/// 2. Return a 302 redirect to the original URL, or 404 if the code is unknown.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    let record = state.store.resolve(&code).await.map_err(|e| {
        tracing::debug!("Redirect miss for '{}'", code);
        ApiError::from(e)
    })?;

    let location = location_header(&record.original_url).ok_or_else(|| {
        tracing::error!("Stored URL for '{}' is not a valid Location header", code);
        ApiError::Internal
    })?;

    tracing::debug!("Redirecting '{}' (click #{})", code, record.clicks);
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// ASCII URLs go out exactly as stored. Anything else is sent in its URI
/// form (punycode host, percent-encoded path); the stored value is untouched.
fn location_header(original_url: &str) -> Option<HeaderValue> {
    if original_url.is_ascii() {
        return HeaderValue::from_str(original_url).ok();
    }
    let parsed = Url::parse(original_url).ok()?;
    HeaderValue::from_str(parsed.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::location_header;
    use crate::handlers::testing::{app, get, json_body};
    use axum::http::{header, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn redirects_with_302_and_counts_click() {
        let (app, state) = app(None);
        let code = state
            .store
            .shorten("https://www.example.com")
            .await
            .into_code();

        let response = app.oneshot(get(&format!("/{code}"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://www.example.com"
        );
        assert_eq!(state.store.get_stats(&code).await.unwrap().clicks, 1);
    }

    #[tokio::test]
    async fn non_ascii_url_redirects_in_uri_form() {
        let (app, state) = app(None);
        let code = state
            .store
            .shorten("https://example.com/caf\u{e9}")
            .await
            .into_code();

        let response = app.oneshot(get(&format!("/{code}"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/caf%C3%A9"
        );
        assert_eq!(
            state.store.get_stats(&code).await.unwrap().original_url,
            "https://example.com/caf\u{e9}"
        );
    }

    #[test]
    fn ascii_locations_are_not_reserialized() {
        // Url would append a trailing slash here
        assert_eq!(
            location_header("https://www.example.com").unwrap(),
            "https://www.example.com"
        );
        assert_eq!(
            location_header("HTTPS://Example.com/a%2fb").unwrap(),
            "HTTPS://Example.com/a%2fb"
        );
    }

    #[tokio::test]
    async fn unknown_code_is_404() {
        let (app, _) = app(None);
        let response = app.oneshot(get("/noexist")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "Short code not found");
    }

    #[tokio::test]
    async fn code_match_is_case_sensitive() {
        let (app, state) = app(None);
        let code = state
            .store
            .shorten("https://www.example.com")
            .await
            .into_code();
        let flipped: String = code
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect();

        let response = app.oneshot(get(&format!("/{flipped}"))).await.unwrap();

        if flipped == code {
            // all-digit code: nothing to flip
            assert_eq!(response.status(), StatusCode::FOUND);
        } else {
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(state.store.get_stats(&code).await.unwrap().clicks, 0);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_redirects_count_every_click() {
        let (app, state) = app(None);
        let code = state
            .store
            .shorten("https://busy.example.com")
            .await
            .into_code();
        let uri = Arc::new(format!("/{code}"));

        let handles: Vec<_> = (0..200)
            .map(|_| {
                let app = app.clone();
                let uri = uri.clone();
                tokio::spawn(async move { app.oneshot(get(&uri)).await.unwrap().status() })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::FOUND);
        }

        assert_eq!(state.store.get_stats(&code).await.unwrap().clicks, 200);
    }
}
