pub mod ai_service;
pub mod catalog_service;
