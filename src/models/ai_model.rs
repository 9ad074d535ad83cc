use serde::{Deserialize, Serialize};

use crate::models::catalog_model::SearchArticleRow;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Structured filter extracted from a free-text query by the completion
/// gateway. Fields may come back as JSON null or as empty strings; both are
/// treated as "not specified".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterpretedQuery {
    pub province: Option<String>,
    pub category: Option<String>,
    pub keywords: Option<String>,
    pub is_video: Option<bool>,
}

impl InterpretedQuery {
    pub fn province(&self) -> Option<&str> {
        self.province.as_deref().filter(|s| !s.is_empty())
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }

    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct AiSearchResponse {
    pub interpreted_query: InterpretedQuery,
    pub articles: Vec<SearchArticleRow>,
}

#[derive(Debug, Serialize)]
pub struct AiRecommendResponse {
    pub province_name: String,
    pub recommendation: String,
    pub articles: Vec<SearchArticleRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpretation_parses_with_nulls() {
        let parsed: InterpretedQuery = serde_json::from_str(
            r#"{"province": "BALI", "category": null, "keywords": "pantai", "is_video": null}"#,
        )
        .unwrap();
        assert_eq!(parsed.province(), Some("BALI"));
        assert_eq!(parsed.category(), None);
        assert_eq!(parsed.keywords(), Some("pantai"));
        assert_eq!(parsed.is_video, None);
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let parsed: InterpretedQuery = serde_json::from_str(
            r#"{"province": "", "category": "", "keywords": "", "is_video": true}"#,
        )
        .unwrap();
        assert_eq!(parsed.province(), None);
        assert_eq!(parsed.category(), None);
        assert_eq!(parsed.keywords(), None);
        assert_eq!(parsed.is_video, Some(true));
    }

    #[test]
    fn malformed_reply_is_an_error() {
        let parsed = serde_json::from_str::<InterpretedQuery>("not json at all");
        assert!(parsed.is_err());
    }
}
