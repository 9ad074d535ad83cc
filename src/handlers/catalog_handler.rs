use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::config::AppState;
use crate::models::catalog_model::*;
use crate::services::catalog_service::CatalogService;
use crate::utils::api_response::ApiError;

// The failure contract is deliberately uneven across these handlers: the
// best-effort read endpoints degrade to empty/zero bodies, the download
// increment reports `{success: false}`, and only the detail view surfaces an
// error status. Clients depend on the difference.

pub async fn list_provinces_handler(State(state): State<AppState>) -> Json<Vec<ProvinceResponse>> {
    match CatalogService::list_provinces(&state.db).await {
        Ok(provinces) => Json(provinces),
        Err(err) => {
            tracing::error!("Province listing failed: {}", err);
            Json(Vec::new())
        }
    }
}

pub async fn list_articles_handler(
    State(state): State<AppState>,
    Query(params): Query<ArticleFilterParams>,
) -> Json<Vec<ArticleRow>> {
    match CatalogService::list_articles(&state.db, &params).await {
        Ok(articles) => Json(articles),
        Err(err) => {
            tracing::error!("Article listing failed: {}", err);
            Json(Vec::new())
        }
    }
}

pub async fn list_articles_paginated_handler(
    State(state): State<AppState>,
    Query(params): Query<ArticleFilterParams>,
) -> Json<ArticlesResponse> {
    match CatalogService::list_articles_paginated(&state.db, &params).await {
        Ok(page) => Json(page),
        Err(err) => {
            tracing::error!("Paginated article listing failed: {}", err);
            Json(ArticlesResponse::default())
        }
    }
}

pub async fn get_article_handler(
    State(state): State<AppState>,
    Path(article_id): Path<i32>,
) -> Result<Json<ArticleDetailResponse>, ApiError> {
    let detail = CatalogService::get_article_detail(&state.db, article_id)
        .await
        .map_err(|err| {
            tracing::error!("Article detail failed: {}", err);
            ApiError::internal("Database error")
        })?;

    detail
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Article not found"))
}

pub async fn increment_download_handler(
    State(state): State<AppState>,
    Path(image_id): Path<i32>,
) -> Json<DownloadResponse> {
    match CatalogService::increment_download(&state.db, image_id).await {
        Ok(Some(new_count)) => Json(DownloadResponse::counted(new_count)),
        Ok(None) => Json(DownloadResponse::failed("Image not found")),
        Err(err) => {
            tracing::error!("Download increment failed: {}", err);
            Json(DownloadResponse::failed(err.to_string()))
        }
    }
}

pub async fn list_categories_handler(State(state): State<AppState>) -> Json<Vec<CategoryResponse>> {
    match CatalogService::list_categories(&state.db).await {
        Ok(categories) => Json(categories),
        Err(err) => {
            tracing::error!("Category listing failed: {}", err);
            Json(Vec::new())
        }
    }
}

pub async fn popular_tags_handler(State(state): State<AppState>) -> Json<Vec<PopularTagResponse>> {
    match CatalogService::popular_tags(&state.db).await {
        Ok(tags) => Json(tags),
        Err(err) => {
            tracing::error!("Popular tag listing failed: {}", err);
            Json(Vec::new())
        }
    }
}

pub async fn get_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    match CatalogService::get_stats(&state.db).await {
        Ok(stats) => Json(stats),
        Err(err) => {
            tracing::error!("Stats aggregation failed: {}", err);
            Json(StatsResponse::default())
        }
    }
}
