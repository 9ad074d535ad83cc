use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entities::article_content_image;

/// Closed set of sort keys for article listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleSort {
    #[default]
    Recent,
    Popular,
    Downloads,
}

/// Query-string filters shared by the plain and paginated listings. All
/// filters are optional; `limit`/`offset` are unsigned so negative values are
/// rejected at deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleFilterParams {
    pub province_id: Option<i32>,
    pub category_id: Option<i32>,
    pub is_video: Option<bool>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: ArticleSort,
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: u64,
}

/// Listing row: article joined with its optional province/city/category names
/// plus the per-query summed image download count.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct ArticleRow {
    pub id: i32,
    pub title: String,
    pub thumbnail: String,
    pub is_video: bool,
    pub total_view: i32,
    pub total_download: i64,
    pub province_name: Option<String>,
    pub city_name: Option<String>,
    pub tags: Option<String>,
    pub posting_date: Option<NaiveDate>,
    pub category: Option<String>,
}

/// Row shape for the AI search and recommendation queries, which skip the
/// download aggregate.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct SearchArticleRow {
    pub id: i32,
    pub title: String,
    pub thumbnail: String,
    pub is_video: bool,
    pub total_view: i32,
    pub province_name: Option<String>,
    pub city_name: Option<String>,
    pub tags: Option<String>,
    pub posting_date: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleRow>,
    pub total: u64,
    pub has_more: bool,
}

#[derive(Debug, FromQueryResult)]
pub struct ProvinceRow {
    pub id: i32,
    pub name: String,
    pub article_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ProvinceResponse {
    pub id: i32,
    pub name: String,
    pub article_count: i64,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub label: String,
    pub slug: String,
    pub thumbnail: String,
    pub article_count: i64,
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct PopularTagResponse {
    pub tag: String,
    pub count: i32,
}

#[derive(Debug, FromQueryResult)]
pub struct ArticleDetailRow {
    pub id: i32,
    pub title: String,
    pub thumbnail: String,
    pub is_video: bool,
    pub video_url: Option<String>,
    pub total_view: i32,
    pub province_name: Option<String>,
    pub city_name: Option<String>,
    pub tags: Option<String>,
    pub posting_date: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleDetailResponse {
    pub id: i32,
    pub title: String,
    pub thumbnail: String,
    pub is_video: bool,
    pub video_url: Option<String>,
    pub total_view: i32,
    pub total_download: i64,
    pub province_name: Option<String>,
    pub city_name: Option<String>,
    pub tags: Option<String>,
    pub posting_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub images: Vec<article_content_image::Model>,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DownloadResponse {
    pub fn counted(new_count: i32) -> Self {
        Self {
            success: true,
            new_count: Some(new_count),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            new_count: None,
            message: Some(message.into()),
        }
    }
}

/// Aggregate counters for the frontend dashboard. `Default` doubles as the
/// all-zero degraded shape returned when the datastore is unreachable.
#[derive(Debug, Default, Serialize)]
pub struct StatsResponse {
    pub total_articles: u64,
    pub total_photos: u64,
    pub total_videos: u64,
    pub total_provinces: u64,
    pub total_images: u64,
    pub total_views: i64,
    pub total_downloads: i64,
}
