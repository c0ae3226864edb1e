use crate::error::GatewayError;
use crate::state::AppState;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState, url_root: &str) -> Router {
    Router::new()
        .route(&redirect_route(url_root), get(handle_redirect))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Mounts the wildcard under the configured root, so a deployment behind
/// a path-rewriting proxy can match what the proxy forwards.
fn redirect_route(url_root: &str) -> String {
    let trimmed = url_root.trim_matches('/');
    if trimmed.is_empty() {
        "/{*source}".to_owned()
    } else {
        format!("/{trimmed}/{{*source}}")
    }
}

/// GET (and HEAD) on the wildcard: the remainder of the path is the source
/// page URL, with the original query string carried over verbatim.
async fn handle_redirect(
    State(state): State<AppState>,
    Path(source): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok());

    let target = state
        .service()
        .redirect(&source, query.as_deref(), user_agent)
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{RedirectConfig, RedirectService};
    use axum::body::Body;
    use axum::http::{Method, Request};
    use questube_cache::MemoryFormatCache;
    use questube_resolver::YtDlpResolver;
    use std::sync::Arc;
    use tower::ServiceExt;

    const QUEST_UA: &str = "Mozilla/5.0 (Linux; Android 10; Quest 2) AppleWebKit/537.36";

    /// The resolver points at a program that does not exist, so every
    /// resolution fails and the handler falls back to the page redirect.
    /// That is enough to exercise the routing and response mapping.
    fn app(url_root: &str) -> Router {
        let service = RedirectService::new(
            Arc::new(YtDlpResolver::new("/nonexistent/bin/yt-dlp")),
            Arc::new(MemoryFormatCache::new()),
            RedirectConfig::builder().build(),
        );
        router(AppState::new(service), url_root)
    }

    fn request(method: Method, uri: &str, user_agent: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::USER_AGENT, user_agent)
            .body(Body::empty())
            .unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn redirects_with_302_and_location() {
        let response = app("/")
            .oneshot(request(
                Method::GET,
                "/www.youtube.com/watch?v=abc",
                QUEST_UA,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "https://www.youtube.com/watch?v=abc");
    }

    #[tokio::test]
    async fn desktop_agent_is_sent_to_the_page() {
        let response = app("/")
            .oneshot(request(
                Method::GET,
                "/youtu.be/abc",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "https://youtu.be/abc");
    }

    #[tokio::test]
    async fn untrusted_host_is_404() {
        let response = app("/")
            .oneshot(request(Method::GET, "/evil.example/watch?v=abc", QUEST_UA))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unparsable_source_is_400() {
        let response = app("/")
            .oneshot(request(Method::GET, "/%20/bad", QUEST_UA))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn head_requests_are_answered_like_get() {
        let response = app("/")
            .oneshot(request(Method::HEAD, "/youtu.be/abc", QUEST_UA))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "https://youtu.be/abc");
    }

    #[tokio::test]
    async fn custom_root_prefixes_the_route() {
        let app = app("/v/");

        let hit = app
            .clone()
            .oneshot(request(Method::GET, "/v/youtu.be/abc", QUEST_UA))
            .await
            .unwrap();
        assert_eq!(hit.status(), StatusCode::FOUND);

        let miss = app
            .oneshot(request(Method::GET, "/youtu.be/abc", QUEST_UA))
            .await
            .unwrap();
        assert_eq!(miss.status(), StatusCode::NOT_FOUND);
    }
}
