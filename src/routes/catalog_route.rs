use axum::{
    routing::{get, post},
    Router,
};

use crate::config::AppState;
use crate::handlers::catalog_handler::*;
use crate::handlers::root_handler;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/provinces", get(list_provinces_handler))
        .route("/articles", get(list_articles_handler))
        .route("/articles/paginated", get(list_articles_paginated_handler))
        .route("/articles/{id}", get(get_article_handler))
        .route("/images/{id}/download", post(increment_download_handler))
        .route("/categories", get(list_categories_handler))
        .route("/popular-tags", get(popular_tags_handler))
        .route("/stats", get(get_stats_handler))
}
