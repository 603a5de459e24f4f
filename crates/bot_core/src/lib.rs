//! bot_core
//!
//! 「秘密の単語あてゲーム」ボットの共通ロジックを提供するコアクレート。
//! ローカルLLMエンドポイント連携（プロンプト補完アダプタ）、ゲーム状態機械、
//! 会話状態ストア、ターンオーケストレーションを含む。Web層から独立。

pub mod config;
pub mod game;
pub mod llama;
pub mod prompt;
pub mod responses;
pub mod services;
pub mod store;

// 主要な型を再エクスポート
pub use config::BotConfig;
pub use game::GameState;
pub use llama::{HttpTransport, LlamaModel, PromptCompletionModel, PromptResponse};
pub use services::TurnService;
pub use store::{MemoryStateStore, StateStore};
