use axum::{
    routing::{get, post},
    Router,
};

use crate::config::AppState;
use crate::handlers::ai_handler::*;

pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/search", post(ai_search_handler))
        .route("/recommend/{province_id}", get(ai_recommend_handler))
}
