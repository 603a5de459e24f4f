//! Prompt rendering: role-tagged messages, templates and the per-turn memory.
//!
//! A [`PromptRenderer`] turns conversation memory plus a template into an
//! ordered message sequence capped at an input-token budget. Token counting is
//! a chars/4 estimate, good enough for a local guard against runaway prompts.
//!
//! Invariant: render order == send order (system first, then the user input).

use serde::{Deserialize, Serialize};

/// Message role within a rendered conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a rendered conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// Generation parameters carried by a template.
///
/// `max_tokens` / `temperature` use `Option` so that "omitted" is
/// distinguishable from an explicit value; an explicit zero is respected and
/// never replaced by a default downstream.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Input-token budget for rendering.
    pub max_input_tokens: u32,
    /// Output-token cap; `None` lets the adapter apply its default (50).
    pub max_tokens: Option<u32>,
    /// Sampling temperature; `None` lets the adapter apply its default (0.7).
    pub temperature: Option<f32>,
}

/// A named prompt template: system text plus generation config.
///
/// The system text may reference `{{secret_word}}` and `{{input}}`, which the
/// renderer substitutes from the turn memory.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub system: String,
    pub completion: CompletionConfig,
}

/// 1ターン分の会話メモリ（レンダリング入力）。
#[derive(Debug, Clone)]
pub struct TurnMemory {
    /// 今回のユーザー入力テキスト
    pub input: String,
    /// 進行中ゲームの秘密の単語
    pub secret_word: String,
}

/// Result of rendering: ordered messages plus a truncation flag.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    pub output: Vec<Message>,
    /// True when the rendered content exceeded the input-token budget.
    pub too_long: bool,
}

/// Renders conversation memory into a role-tagged message sequence.
pub trait PromptRenderer {
    fn render_as_messages(&self, memory: &TurnMemory, template: &PromptTemplate) -> RenderedPrompt;
}

/// Default renderer: substitutes template placeholders and emits
/// `[system, user]` in that order.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer;

impl PromptRenderer for TemplateRenderer {
    fn render_as_messages(&self, memory: &TurnMemory, template: &PromptTemplate) -> RenderedPrompt {
        let system = template
            .system
            .replace("{{secret_word}}", &memory.secret_word)
            .replace("{{input}}", &memory.input);

        let output = vec![
            Message::new(Role::System, system),
            Message::new(Role::User, memory.input.clone()),
        ];

        let total: usize = output.iter().map(|m| estimate_tokens(&m.content)).sum();
        let too_long = total > template.completion.max_input_tokens as usize;

        RenderedPrompt { output, too_long }
    }
}

/// Rough token estimate: 4 characters per token, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// ヒント生成用の組み込みテンプレート。
/// 生成パラメータは未指定のままにして、アダプタ側のデフォルト(50 / 0.7)に任せる。
pub fn hint_template() -> PromptTemplate {
    PromptTemplate {
        name: "hint",
        system: "You are the AI in a guess-the-secret-word game. The secret word is {{secret_word}}. \
                 The player asks questions to narrow it down. Reply with one short, cryptic hint that \
                 helps without ever writing the secret word itself."
            .to_string(),
        completion: CompletionConfig {
            max_input_tokens: 2048,
            max_tokens: None,
            temperature: None,
        },
    }
}
