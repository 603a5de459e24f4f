//! TurnService
//!
//! 受信メッセージ1件 = 1ターンのオーケストレーション層。
//! 会話状態のロード、`/quit` コマンドの分岐、状態機械への委譲、
//! ヒント経路でのプロンプト補完アダプタ呼び出し、状態の保存を担う。
//! Web層から独立した形でターン処理を提供。

use color_eyre::{eyre::eyre, Result};

use crate::game::{GameState, TurnAction};
use crate::llama::{PromptCompletionModel, PromptResponse};
use crate::prompt::{hint_template, PromptTemplate, TurnMemory};
use crate::responses;
use crate::store::StateStore;

/// 中断コマンド（状態に関係なく認識する）
pub const QUIT_COMMAND: &str = "/quit";

/// ターンオーケストレータ。
///
/// コラボレータはすべて明示的に注入する（プロセス全体のシングルトンは
/// 持たない）。会話単位のターン直列化はホスティング層の前提条件。
pub struct TurnService<M, S> {
    model: M,
    store: S,
    hint_template: PromptTemplate,
}

impl<M, S> TurnService<M, S>
where
    M: PromptCompletionModel + Sync,
    S: StateStore + Sync,
{
    /// 新しいTurnServiceインスタンスを作成
    pub fn new(model: M, store: S) -> Self {
        Self {
            model,
            store,
            hint_template: hint_template(),
        }
    }

    /// 受信メッセージを1ターンとして処理し、応答テキストを返す。
    ///
    /// 応答は必ず1件。保存はターン本体の処理が完了した後に行うため、
    /// 途中でエラーになったターンは何も永続化しない。
    pub async fn handle_message(&self, conversation_id: &str, text: &str) -> Result<String> {
        if text.trim() == QUIT_COMMAND {
            return self.quit(conversation_id).await;
        }

        let mut state = self.store.load(conversation_id).await?;
        let action = state.advance(text, responses::pick_secret_word)?;

        let reply = match &action {
            TurnAction::Started => responses::start_game(),
            TurnAction::Won { secret_word } => responses::you_win(secret_word),
            TurnAction::Lost { secret_word } => responses::you_lose(secret_word),
            TurnAction::NeedHint {
                secret_word,
                guess_count,
                remaining_guesses,
            } => {
                let hint = self.get_hint(text, secret_word).await?;
                if crate::game::contains_ignore_case(&hint, secret_word) {
                    // 生成されたヒントが答えを含むときは絶対に転送しない
                    tracing::warn!(
                        target: "turn",
                        guess = guess_count,
                        "hint contained the secret word; blocked"
                    );
                    format!("[{guess_count}] {}", responses::block_secret_word())
                } else if *remaining_guesses == 1 {
                    format!("[{guess_count}] {}", responses::last_guess(&hint))
                } else {
                    format!("[{guess_count}] {hint}")
                }
            }
        };

        // 終端遷移でクリアされた値も含め、毎ターン無条件で書き戻す
        self.store.save(conversation_id, &state).await?;
        tracing::debug!(
            target: "turn",
            conversation = conversation_id,
            active = state.is_active(),
            remaining = state.remaining_guesses,
            "turn persisted"
        );

        Ok(reply)
    }

    /// `/quit` の分岐。どの状態からでも安全で、二重実行しても冪等。
    async fn quit(&self, conversation_id: &str) -> Result<String> {
        let state = self.store.load(conversation_id).await?;
        let secret_word = state.secret_word.clone();
        self.store.clear(conversation_id).await?;
        tracing::info!(target: "turn", conversation = conversation_id, "game quit");
        Ok(responses::quit_game(secret_word.as_deref()))
    }

    /// ユーザー入力をもとにヒントを1件生成する。
    ///
    /// `TooLong` を含む非成功はエラーとして送出し、最上位の
    /// ターンエラーハンドラに処理を委ねる（リトライなし）。
    async fn get_hint(&self, input: &str, secret_word: &str) -> Result<String> {
        let memory = TurnMemory {
            input: input.to_string(),
            secret_word: secret_word.to_string(),
        };

        match self.model.complete_prompt(&memory, &self.hint_template).await? {
            PromptResponse::Success { message, .. } => Ok(message.content),
            PromptResponse::TooLong { error } => Err(eyre!(error)),
        }
    }

    /// 保存済み状態を覗くテスト用ヘルパー
    #[doc(hidden)]
    pub async fn peek_state(&self, conversation_id: &str) -> Result<GameState> {
        self.store.load(conversation_id).await
    }

    /// 注入したモデルへの参照（テスト用）
    #[doc(hidden)]
    pub fn model_ref(&self) -> &M {
        &self.model
    }
}
