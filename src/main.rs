mod config;
mod entities;
mod handlers;
mod models;
mod routes;
mod services;
mod utils;

use config::{AppState, Config};
use dotenvy::dotenv;
use sea_orm::Database;
use std::net::SocketAddr;

use crate::services::ai_service::CompletionService;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let cfg = Config::init();
    println!("🚀 Starting Wisata Nusantara API...");

    // 1. Database Connection
    println!("📡 Connecting to Database...");
    let db = Database::connect(&cfg.database_url)
        .await
        .expect("🔥 Failed to connect to Database!");
    println!("✅ Database Connected!");

    // 2. Completion Gateway client
    let completion_service = CompletionService::new(&cfg);

    // 3. Build App State
    let state = AppState {
        db: std::sync::Arc::new(db),
        completion_service,
    };

    // 4. Initialize Router
    let app = routes::create_routes(&cfg).with_state(state);

    // 5. Start Server
    let addr_str = format!("{}:{}", cfg.server_host, cfg.server_port);
    let addr: SocketAddr = addr_str.parse().expect("Invalid address");

    println!("🎯 Server ready! Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
