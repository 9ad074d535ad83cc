pub mod ai_handler;
pub mod catalog_handler;

use axum::{response::IntoResponse, Json};

pub async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Wisata Nusantara API" }))
}
