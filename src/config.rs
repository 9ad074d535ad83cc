use sea_orm::DatabaseConnection;
use std::env;
use std::sync::Arc;

use crate::services::ai_service::CompletionService;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
}

#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub completion_service: CompletionService,
}

impl Config {
    pub fn init() -> Config {
        let server_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .expect("PORT must be a number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env");

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let openai_api_key = env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set");
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Config {
            server_host,
            server_port,
            database_url,
            cors_origins,
            openai_api_key,
            openai_base_url,
            openai_model,
        }
    }
}
