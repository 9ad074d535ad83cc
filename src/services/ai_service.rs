use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::models::ai_model::InterpretedQuery;

const INTERPRET_MAX_TOKENS: u32 = 200;
const RECOMMEND_MAX_TOKENS: u32 = 150;

/// Client for the hosted chat-completion endpoint. Used for two things only:
/// turning a free-text search into a structured filter, and producing a short
/// recommendation blurb for a province.
#[derive(Clone)]
pub struct CompletionService {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug)]
pub enum CompletionError {
    Connection(String),
    Api(String),
    Parse(String),
}

impl std::fmt::Display for CompletionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionError::Connection(msg) => write!(f, "Connection error: {}", msg),
            CompletionError::Api(msg) => write!(f, "API error: {}", msg),
            CompletionError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for CompletionError {}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl CompletionService {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            client: Client::new(),
        }
    }

    /// Interpret a free-text search query into `{province, category,
    /// keywords, is_video}`. The province/category vocabularies are passed in
    /// fresh on every call so the model can only pick known values. A reply
    /// that is not the expected JSON shape is a hard failure.
    pub async fn interpret_search(
        &self,
        query: &str,
        provinces: &[String],
        categories: &[String],
    ) -> Result<InterpretedQuery, CompletionError> {
        let system_prompt = interpretation_prompt(provinces, categories);

        debug!("Interpreting search query: {}", query);
        let content = self
            .chat(&system_prompt, query, true, INTERPRET_MAX_TOKENS)
            .await?;

        serde_json::from_str(&content).map_err(|e| CompletionError::Parse(e.to_string()))
    }

    /// Generate a 2-3 sentence recommendation for a province, referencing the
    /// given article titles.
    pub async fn recommend(
        &self,
        province_name: &str,
        titles: &[&str],
    ) -> Result<String, CompletionError> {
        let system_prompt = "Kamu adalah pemandu wisata Indonesia yang ramah dan informatif. \
             Berikan rekomendasi singkat dan menarik dalam 2-3 kalimat.";
        let user_prompt = format!(
            "Berikan rekomendasi wisata singkat untuk provinsi {}. Beberapa destinasi populer di sana: {}",
            province_name,
            titles.join(", ")
        );

        debug!("Requesting recommendation for province: {}", province_name);
        self.chat(system_prompt, &user_prompt, false, RECOMMEND_MAX_TOKENS)
            .await
    }

    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        json_mode: bool,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ],
            "max_tokens": max_tokens
        });
        if json_mode {
            body["response_format"] = json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(format!("HTTP {}: {}", status, text)));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CompletionError::Parse("Reply carried no choices".to_string()))
    }
}

fn interpretation_prompt(provinces: &[String], categories: &[String]) -> String {
    format!(
        r#"Kamu adalah asisten pencarian wisata Indonesia.
Tugasmu adalah menganalisis query pencarian dan mengekstrak:
1. province: nama provinsi yang dimaksud (harus salah satu dari: {}) atau null
2. category: kategori wisata (harus salah satu dari: {}) atau null
3. keywords: kata kunci pencarian yang relevan (bisa berupa nama tempat, aktivitas, dll)
4. is_video: true jika mencari video, false jika foto, null jika tidak spesifik

Jawab dalam format JSON:
{{"province": "...", "category": "...", "keywords": "...", "is_video": null}}"#,
        provinces.join(", "),
        categories.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_current_vocabularies() {
        let provinces = vec!["BALI".to_string(), "JAWA BARAT".to_string()];
        let categories = vec!["Alam".to_string(), "Kuliner".to_string()];

        let prompt = interpretation_prompt(&provinces, &categories);
        assert!(prompt.contains("BALI, JAWA BARAT"));
        assert!(prompt.contains("Alam, Kuliner"));
        assert!(prompt.contains(r#""is_video": null"#));
    }

    #[test]
    fn gateway_reply_parses_into_interpretation() {
        let reply: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant",
                "content": "{\"province\": \"BALI\", \"category\": null, \"keywords\": \"pantai\", \"is_video\": false}"}}]}"#,
        )
        .unwrap();
        let content = &reply.choices[0].message.content;
        let interp: InterpretedQuery = serde_json::from_str(content).unwrap();
        assert_eq!(interp.province(), Some("BALI"));
        assert_eq!(interp.is_video, Some(false));
    }
}
