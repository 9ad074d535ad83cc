pub mod ai_model;
pub mod catalog_model;
