//! Cross-origin policy for the browser client.
//!
//! Origins are matched exactly against the configured allow-list. Credentialed
//! requests are permitted, so neither origins nor headers may be wildcards.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, CorsLayer};

use crate::config::CorsConfig;

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header, http::Request, routing::post, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = CorsConfig {
            allowed_origins: vec![
                "https://halo-hospital.netlify.app".to_string(),
                "http://localhost:5173".to_string(),
            ],
        };
        Router::new()
            .route("/summary", post(|| async { "ok" }))
            .layer(cors_layer(&config))
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/summary")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn allowed_origin_gets_credentialed_headers() {
        let response = app()
            .oneshot(preflight("https://halo-hospital.netlify.app"))
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://halo-hospital.netlify.app"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "content-type"
        );
    }

    #[tokio::test]
    async fn lookalike_origin_is_not_allowed() {
        let response = app()
            .oneshot(preflight("https://evil-halo-hospital.netlify.app"))
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn simple_request_from_dev_origin_is_allowed() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/summary")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );
    }
}
