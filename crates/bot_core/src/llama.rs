//! Llama completion-endpoint adapter.
//!
//! Bridges the generic "render conversation, then complete" contract onto a
//! locally hosted llama-style completion API. The endpoint accepts a flat
//! prompt string, not a structured chat transcript, so the rendered message
//! sequence is flattened with single-space separators. Role boundaries are
//! discarded on purpose; the endpoint contract requires the lossy form.
//!
//! Environment:
//! * endpoint URL and API key come from [`crate::config::BotConfig`]
//!   (`LLAMA_ENDPOINT` / `LLAMA_API_KEY`).
//!
//! Failure policy: a too-long render is a typed [`PromptResponse::TooLong`]
//! with no network call; transport and endpoint failures are returned as
//! errors without retry.

use std::time::Duration;

use color_eyre::{eyre::eyre, eyre::WrapErr, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::prompt::{
    Message, PromptRenderer, PromptTemplate, Role, TemplateRenderer, TurnMemory,
};

/// Output-token cap applied when the template omits one.
pub const DEFAULT_MAX_TOKENS: u32 = 50;

/// Sampling temperature applied when the template omits one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Wire request for the completion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// One generated completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub text: String,
}

/// Wire response from the completion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

/// Raw transport to the completion endpoint. Split out from the adapter so
/// tests can count calls and capture requests.
pub trait CompletionTransport {
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse>> + Send;
}

impl<T: CompletionTransport> CompletionTransport for std::sync::Arc<T> {
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse>> + Send {
        (**self).complete(request)
    }
}

/// reqwest-backed transport. Owns its own HTTP client configured with the
/// endpoint URL and bearer key; never borrows one from another component.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            // Overall timeout so a stalled endpoint doesn't hang the turn.
            .timeout(Duration::from_secs(30))
            .build()
            .wrap_err("building reqwest client for the completion endpoint")?;
        Ok(Self { client, endpoint: endpoint.into(), api_key: api_key.into() })
    }
}

impl CompletionTransport for HttpTransport {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .wrap_err("sending completion request")?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        debug!(target: "llama", status = %status, len = text.len(), "completion_response_raw");

        if !status.is_success() {
            return Err(eyre!("completion endpoint status {}: {}", status.as_u16(), text));
        }

        serde_json::from_str(&text).wrap_err("parsing completion response")
    }
}

/// Normalized outcome of one prompt completion.
#[derive(Debug, Clone)]
pub enum PromptResponse {
    /// The endpoint produced text. `input` echoes the last user message of
    /// the rendered sequence when there was one.
    Success {
        input: Option<Message>,
        message: Message,
    },
    /// Rendering exceeded the input-token budget; no request was made.
    TooLong { error: String },
}

/// The single-method completion contract the orchestrator programs against.
pub trait PromptCompletionModel {
    fn complete_prompt(
        &self,
        memory: &TurnMemory,
        template: &PromptTemplate,
    ) -> impl std::future::Future<Output = Result<PromptResponse>> + Send;
}

/// Prompt adapter over an arbitrary [`CompletionTransport`].
#[derive(Debug, Clone)]
pub struct LlamaModel<T> {
    transport: T,
    renderer: TemplateRenderer,
    model: String,
    log_requests: bool,
}

impl<T> LlamaModel<T> {
    pub fn new(transport: T, model: impl Into<String>, log_requests: bool) -> Self {
        Self {
            transport,
            renderer: TemplateRenderer,
            model: model.into(),
            log_requests,
        }
    }
}

impl<T: CompletionTransport + Sync> PromptCompletionModel for LlamaModel<T> {
    async fn complete_prompt(
        &self,
        memory: &TurnMemory,
        template: &PromptTemplate,
    ) -> Result<PromptResponse> {
        let rendered = self.renderer.render_as_messages(memory, template);
        if rendered.too_long {
            return Ok(PromptResponse::TooLong {
                error: "The generated prompt length was too long".to_string(),
            });
        }

        // The triggering user input, surfaced so callers can correlate the
        // completion with it. Only the final message counts, and only if it
        // is a user message.
        let input = rendered
            .output
            .last()
            .filter(|m| m.role == Role::User)
            .cloned();

        if self.log_requests {
            info!(target: "llama", messages = ?rendered.output, "chat prompt");
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            prompt: rendered
                .output
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            max_tokens: template.completion.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: template.completion.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };

        let response = match self.transport.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!(target: "llama", error = %e, "completion call failed");
                return Err(e);
            }
        };

        if self.log_requests {
            info!(target: "llama", choices = ?response.choices, "chat response");
        }

        let text = response
            .choices
            .first()
            .map(|c| c.text.trim().to_string())
            .ok_or_else(|| eyre!("completion endpoint returned no choices"))?;

        Ok(PromptResponse::Success {
            input,
            message: Message::new(Role::Assistant, text),
        })
    }
}
