use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::AppState;
use crate::models::ai_model::*;
use crate::models::catalog_model::SearchArticleRow;
use crate::services::catalog_service::CatalogService;
use crate::utils::api_response::ApiError;

// Unlike the catalog handlers, both AI endpoints convert every failure into a
// 500; there is no degraded body here.

pub async fn ai_search_handler(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<AiSearchResponse>, ApiError> {
    let provinces = CatalogService::province_names(&state.db)
        .await
        .map_err(|err| search_error(&err))?;
    let categories = CatalogService::category_labels(&state.db)
        .await
        .map_err(|err| search_error(&err))?;

    let interpreted_query = state
        .completion_service
        .interpret_search(&payload.query, &provinces, &categories)
        .await
        .map_err(|err| search_error(&err))?;

    let articles = CatalogService::search_interpreted(&state.db, &interpreted_query)
        .await
        .map_err(|err| search_error(&err))?;

    Ok(Json(AiSearchResponse {
        interpreted_query,
        articles,
    }))
}

pub async fn ai_recommend_handler(
    State(state): State<AppState>,
    Path(province_id): Path<i32>,
) -> Result<Json<AiRecommendResponse>, ApiError> {
    let province_name = CatalogService::province_name(&state.db, province_id)
        .await
        .map_err(|err| recommend_error(&err))?
        .ok_or_else(|| ApiError::not_found("Province not found"))?;

    let articles = CatalogService::top_articles_for_province(&state.db, province_id)
        .await
        .map_err(|err| recommend_error(&err))?;

    let recommendation = match template_recommendation(&province_name, &articles) {
        Some(text) => text,
        None => {
            let titles: Vec<&str> = articles.iter().take(5).map(|a| a.title.as_str()).collect();
            state
                .completion_service
                .recommend(&province_name, &titles)
                .await
                .map_err(|err| recommend_error(&err))?
        }
    };

    Ok(Json(AiRecommendResponse {
        province_name,
        recommendation,
        articles,
    }))
}

/// Fixed sentence for a province with no active articles. `None` means there
/// is material to recommend from and the completion gateway is consulted; the
/// gateway is never called for an empty province.
fn template_recommendation(province_name: &str, articles: &[SearchArticleRow]) -> Option<String> {
    if !articles.is_empty() {
        return None;
    }
    Some(format!(
        "Jelajahi keindahan {}! Provinsi ini menyimpan banyak destinasi wisata menarik yang menunggu untuk ditemukan.",
        province_name
    ))
}

fn search_error(err: &dyn std::fmt::Display) -> ApiError {
    tracing::error!("AI search error: {}", err);
    ApiError::internal(err.to_string())
}

fn recommend_error(err: &dyn std::fmt::Display) -> ApiError {
    tracing::error!("AI recommend error: {}", err);
    ApiError::internal(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> SearchArticleRow {
        SearchArticleRow {
            id: 1,
            title: title.to_string(),
            thumbnail: "thumb.jpg".to_string(),
            is_video: false,
            total_view: 10,
            province_name: None,
            city_name: None,
            tags: None,
            posting_date: None,
            category: None,
        }
    }

    #[test]
    fn empty_province_gets_the_fixed_sentence() {
        let text = template_recommendation("Gorontalo", &[]).unwrap();
        assert!(text.contains("Gorontalo"));
        assert!(text.starts_with("Jelajahi keindahan"));
    }

    #[test]
    fn provinces_with_articles_defer_to_the_gateway() {
        let articles = [article("Pantai Kuta")];
        assert_eq!(template_recommendation("Bali", &articles), None);
    }
}
