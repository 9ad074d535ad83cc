use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::{AppState, Config};

pub mod ai_route;
pub mod catalog_route;

pub fn create_routes(cfg: &Config) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(allowed_origins(&cfg.cors_origins))
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .nest("/api", catalog_route::catalog_routes())
        .nest("/api/ai", ai_route::ai_routes())
        .layer(cors)
}

// tower-http refuses a wildcard origin together with credentials, so `*` in
// the allow-list mirrors the request origin instead.
fn allowed_origins(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        )
    }
}
