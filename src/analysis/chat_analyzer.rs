//! Generative analysis backend over an OpenAI-compatible chat API
//!
//! Issues one completion request for the issue title and one for the log
//! analysis body. No internal retry; a failed or empty response is the
//! caller's problem to degrade from.

use super::traits::{LogAnalysis, LogAnalyzer};
use crate::core::config::AnalyzerSettings;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;

/// Title prefixes some models insist on adding
const TITLE_PREFIXES: &[&str] = &["**Title:**", "Pod Health Summary:"];

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Analysis backend calling a chat completions endpoint
pub struct ChatAnalyzer {
    client: reqwest::Client,
    settings: AnalyzerSettings,
}

impl ChatAnalyzer {
    /// Create a backend from resolved settings
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.endpoint.trim_end_matches('/')
        )
    }

    /// Issue one completion request and return the trimmed message content
    async fn complete(&self, prompt: String) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.settings.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }

    fn title_prompt(log_payload: &str) -> String {
        format!(
            "You are a Kubernetes pod analysis assistant.\n\n\
             Analyze the following pod log data and create:\n\
             - A concise and descriptive title summarizing the pod health and issues \
             (without prefixes like \"Title:\").\n\n\
             Pod Log Data:\n{log_payload}\n\n\
             [TASK]\nCreate:\n\
             - Summary: (Concise title summarizing the pod health and issues)"
        )
    }

    fn analysis_prompt(log_payload: &str) -> String {
        format!(
            "You are a Kubernetes pod analysis assistant.\n\n\
             Analyze the following pod log data and create a structured summary including:\n\
             - Key events related to pod lifecycle and health.\n\
             - Warnings and errors with timestamps.\n\
             - Recommendations for resolving issues if applicable.\n\n\
             Pod Log Data:\n{log_payload}\n\n\
             [TASK]\nCreate:\n\
             - Analysis:\n\
               - Key Events:\n    (List significant events chronologically)\n\
               - Warnings and Errors:\n    (Summarize warnings and errors with details and timestamps)\n\
               - Recommendations:\n    (Provide actionable recommendations based on the analysis)"
        )
    }

    fn clean_title(raw: &str) -> String {
        let mut title = raw.to_string();
        for prefix in TITLE_PREFIXES {
            title = title.replace(prefix, "");
        }
        title.trim().to_string()
    }
}

#[async_trait]
impl LogAnalyzer for ChatAnalyzer {
    fn name(&self) -> &str {
        "chat"
    }

    async fn analyze(&self, log_payload: &str) -> anyhow::Result<LogAnalysis> {
        let title = self.complete(Self::title_prompt(log_payload)).await?;
        let body = self.complete(Self::analysis_prompt(log_payload)).await?;

        Ok(LogAnalysis {
            title: Self::clean_title(&title),
            body,
        })
    }
}
