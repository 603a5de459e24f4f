//! ユーザー向けメッセージと秘密の単語プール
//!
//! ゲーム進行で送る定型文をランダムなバリエーション付きで生成する。
//! 文字列生成のみで副作用なし。

use rand::{seq::SliceRandom, thread_rng, Rng};

/// 秘密の単語プール（小文字で保持、照合は常に小文字同士）
const SECRET_WORDS: &[&str] = &[
    "galaxy", "volcano", "compass", "lantern", "glacier", "meadow", "anchor", "temple",
];

/// プールから秘密の単語を1つ選ぶ。
pub fn pick_secret_word() -> String {
    let mut rng = thread_rng();
    SECRET_WORDS
        .choose(&mut rng)
        .copied()
        .unwrap_or("galaxy")
        .to_string()
}

/// ゲーム開始メッセージ。
pub fn start_game() -> String {
    pick(&[
        "Let's play guess the secret word! You have 20 guesses. Ask me anything and I'll give you a hint.",
        "New game started. I'm thinking of a secret word - you have 20 guesses to find it.",
        "Game on! Guess my secret word within 20 tries. Ask away and I'll drop hints.",
    ])
}

/// 勝利メッセージ（単語を開示）。
pub fn you_win(secret_word: &str) -> String {
    let mut rng = thread_rng();
    match rng.gen_range(0..3) {
        0 => format!("You got it! The secret word was \"{secret_word}\". Well played!"),
        1 => format!("Correct! \"{secret_word}\" was the word. Nicely done."),
        _ => format!("That's a win - the secret word was indeed \"{secret_word}\"."),
    }
}

/// 敗北メッセージ（単語を開示）。
pub fn you_lose(secret_word: &str) -> String {
    let mut rng = thread_rng();
    match rng.gen_range(0..3) {
        0 => format!("Out of guesses! The secret word was \"{secret_word}\". Better luck next time."),
        1 => format!("No guesses left. I was thinking of \"{secret_word}\"."),
        _ => format!("That was your last guess - the word was \"{secret_word}\"."),
    }
}

/// ヒントが秘密の単語を含んでいた場合の差し替えメッセージ。
pub fn block_secret_word() -> String {
    pick(&[
        "I almost said the secret word! Let me keep that one to myself - try another question.",
        "Careful, that hint would have given the word away. Ask me something else.",
        "I can't use that hint, it contains the secret word. Try a different angle.",
    ])
}

/// 残り1回の最終推測メッセージ（ヒント本文を含める）。
pub fn last_guess(hint: &str) -> String {
    format!("This is your last guess, make it count! {hint}")
}

/// 中断メッセージ。ゲーム中なら単語を開示、未開始なら専用の文面。
pub fn quit_game(secret_word: Option<&str>) -> String {
    match secret_word {
        Some(word) => format!("Quitting so soon? The secret word was \"{word}\". Send any message to start a new game."),
        None => "No game in progress. Send any message to start one!".to_string(),
    }
}

fn pick(options: &[&str]) -> String {
    let mut rng = thread_rng();
    options.choose(&mut rng).copied().unwrap_or(options[0]).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picked_word_comes_from_pool() {
        for _ in 0..32 {
            let word = pick_secret_word();
            assert!(SECRET_WORDS.contains(&word.as_str()));
            assert_eq!(word, word.to_lowercase());
        }
    }

    #[test]
    fn win_and_lose_reveal_the_word() {
        assert!(you_win("galaxy").contains("galaxy"));
        assert!(you_lose("galaxy").contains("galaxy"));
    }

    #[test]
    fn blocked_message_never_leaks() {
        for _ in 0..16 {
            assert!(!block_secret_word().to_lowercase().contains("galaxy"));
        }
    }

    #[test]
    fn quit_with_and_without_active_word() {
        assert!(quit_game(Some("temple")).contains("temple"));
        assert!(quit_game(None).contains("No game in progress"));
    }
}
