//! ゲーム状態機械
//!
//! 会話ごとの「秘密の単語あてゲーム」の状態と遷移規則。
//! `secret_word` が `None` なら未開始、非空の `Some` ならゲーム中。
//! 空文字の `Some` は壊れた状態であり、ハードエラーとして上位へ送出する。

use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};

/// ゲーム開始時に与える推測回数
pub const INITIAL_GUESSES: u32 = 20;

/// 会話ごとの永続ゲーム状態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 秘密の単語。`None` はゲーム未開始。
    pub secret_word: Option<String>,
    /// これまでの推測回数
    pub guess_count: u32,
    /// 残り推測回数（20からカウントダウン、0で敗北）
    pub remaining_guesses: u32,
}

/// 1ターン分の状態機械の判断結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAction {
    /// 新しいゲームを開始した（このターンではヒント要求なし）
    Started,
    /// 勝利。単語を開示して状態をクリアした。
    Won { secret_word: String },
    /// 推測回数切れ。単語を開示して状態をクリアした。
    Lost { secret_word: String },
    /// ヒントが必要。オーケストレータがアダプタを呼ぶ。
    NeedHint {
        secret_word: String,
        guess_count: u32,
        /// デクリメント後の残り（1なら最終推測文面にする）
        remaining_guesses: u32,
    },
}

impl GameState {
    /// ゲーム進行中か。
    pub fn is_active(&self) -> bool {
        self.secret_word.is_some()
    }

    /// 状態を未開始に戻す（終端遷移の共通処理）。
    pub fn clear(&mut self) {
        self.secret_word = None;
        self.guess_count = 0;
        self.remaining_guesses = 0;
    }

    /// 新しいゲームを開始する。
    pub fn start(&mut self, secret_word: String) {
        self.secret_word = Some(secret_word);
        self.guess_count = 0;
        self.remaining_guesses = INITIAL_GUESSES;
    }

    /// 受信テキストに対して1遷移を実行する。
    ///
    /// 評価順序は固定: 勝利判定 → 推測回数切れ判定 → ヒント要求。
    /// 勝利・敗北時はこの場で状態をクリアする。ヒント経路では
    /// カウンタ更新のみ行い、実際のヒント取得は呼び出し側に委ねる。
    pub fn advance(&mut self, text: &str, pick_word: impl FnOnce() -> String) -> Result<TurnAction> {
        let Some(word) = self.secret_word.clone() else {
            self.start(pick_word());
            return Ok(TurnAction::Started);
        };

        if word.is_empty() {
            // 遷移規則上は到達不能。現れたらバグなので黙って回復しない。
            return Err(eyre!("No secret word is assigned."));
        }

        self.guess_count += 1;
        // ゲーム中は remaining_guesses >= 1 が不変条件。saturating なのは
        // 壊れた永続データでもパニックせず即敗北に落とすため。
        self.remaining_guesses = self.remaining_guesses.saturating_sub(1);

        if contains_ignore_case(text, &word) {
            self.clear();
            return Ok(TurnAction::Won { secret_word: word });
        }

        if self.remaining_guesses == 0 {
            self.clear();
            return Ok(TurnAction::Lost { secret_word: word });
        }

        Ok(TurnAction::NeedHint {
            secret_word: word,
            guess_count: self.guess_count,
            remaining_guesses: self.remaining_guesses,
        })
    }
}

/// 大文字小文字を無視した部分文字列判定。
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(word: &str, remaining: u32, guesses: u32) -> GameState {
        GameState {
            secret_word: Some(word.to_string()),
            guess_count: guesses,
            remaining_guesses: remaining,
        }
    }

    #[test]
    fn idle_turn_starts_a_game() {
        let mut state = GameState::default();
        let action = state.advance("hello", || "galaxy".to_string()).unwrap();
        assert_eq!(action, TurnAction::Started);
        assert_eq!(state.secret_word.as_deref(), Some("galaxy"));
        assert_eq!(state.guess_count, 0);
        assert_eq!(state.remaining_guesses, INITIAL_GUESSES);
    }

    #[test]
    fn win_is_case_insensitive_and_clears_state() {
        let mut state = active("GALAXY", 15, 5);
        let action = state.advance("I guess galaxy", || unreachable!()).unwrap();
        assert_eq!(action, TurnAction::Won { secret_word: "GALAXY".to_string() });
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn last_guess_without_match_is_a_loss() {
        let mut state = active("galaxy", 1, 19);
        let action = state.advance("is it a star?", || unreachable!()).unwrap();
        assert_eq!(action, TurnAction::Lost { secret_word: "galaxy".to_string() });
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn loss_wins_over_partial_match_on_final_guess() {
        let mut state = active("galaxy", 1, 19);
        // "galax" のような部分一致は勝利ではない
        let action = state.advance("galax?", || unreachable!()).unwrap();
        assert!(matches!(action, TurnAction::Lost { .. }));
    }

    #[test]
    fn hint_path_updates_counters() {
        let mut state = active("galaxy", 20, 0);
        let action = state.advance("is it a planet?", || unreachable!()).unwrap();
        assert_eq!(
            action,
            TurnAction::NeedHint {
                secret_word: "galaxy".to_string(),
                guess_count: 1,
                remaining_guesses: 19,
            }
        );
        assert_eq!(state.remaining_guesses, 19);
        assert_eq!(state.guess_count, 1);
        assert!(state.is_active());
    }

    #[test]
    fn active_invariant_holds_after_any_turn() {
        let mut state = active("galaxy", 20, 0);
        for _ in 0..19 {
            state.advance("nope", || unreachable!()).unwrap();
            if let Some(_) = &state.secret_word {
                assert!((1..=INITIAL_GUESSES).contains(&state.remaining_guesses));
            }
        }
        // 20回目で推測回数切れ
        let action = state.advance("nope", || unreachable!()).unwrap();
        assert!(matches!(action, TurnAction::Lost { .. }));
    }

    #[test]
    fn empty_secret_word_is_a_hard_error() {
        let mut state = active("", 5, 3);
        let err = state.advance("anything", || unreachable!()).unwrap_err();
        assert!(format!("{err}").contains("No secret word"));
    }
}
