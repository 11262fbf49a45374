//! Natural-language to SQL translation via an LLM completion service.
//!
//! `QueryTranslator` assembles the instruction prompt, the schema
//! description and the user's question into one prompt, sends it through a
//! [`CompletionService`] and cleans the returned text into executable SQL.
//! No retries happen here; a failed or empty completion is the caller's
//! problem.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;
use crate::schema_descriptor::SchemaDescriptor;

mod errors;

pub use errors::TranslationError;

lazy_static! {
    // Matches an opening fence with an optional language tag, or a bare
    // closing fence. Generated SQL must contain no fence markers afterwards.
    static ref CODE_FENCE: Regex = Regex::new(r"```[a-zA-Z0-9]*").expect("valid fence regex");
}

/// Strip markdown code-fence markers and surrounding whitespace from
/// LLM-generated SQL.
pub fn clean_generated_sql(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// Outbound text-generation call. Object-safe so the orchestrator can be
/// exercised with a substitute in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, TranslationError>;
}

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, config: &ServerConfig) -> Self {
        Self {
            http,
            base_url: GEMINI_BASE_URL.to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
            timeout: Duration::from_secs(config.gemini_timeout_secs),
        }
    }

    /// Point the client at a different endpoint (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, TranslationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Completion service returned {}", status);
            return Err(TranslationError::Status(status.as_u16()));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Decode(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            return Err(TranslationError::EmptyCompletion);
        }

        Ok(text)
    }
}

/// Translates a natural-language query into a cleaned SQL statement.
pub struct QueryTranslator {
    service: Arc<dyn CompletionService>,
    schema: SchemaDescriptor,
}

impl QueryTranslator {
    pub fn new(service: Arc<dyn CompletionService>, schema: SchemaDescriptor) -> Self {
        Self { service, schema }
    }

    pub async fn translate(&self, query: &str) -> Result<String, TranslationError> {
        let prompt = format!(
            "{}\nDatabase Structure:\n{}\nUser Query:\n{}",
            self.schema.prompt(),
            self.schema.structure(),
            query
        );

        let raw = self.service.complete(&prompt).await?;
        let sql = clean_generated_sql(&raw);
        if sql.is_empty() {
            return Err(TranslationError::EmptyCompletion);
        }

        log::debug!("Translated query to SQL: {}", sql);
        Ok(sql)
    }
}
