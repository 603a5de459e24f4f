//! アプリケーション設定
//!
//! 補完エンドポイントの接続情報は環境変数から読み込む。
//! `LLAMA_ENDPOINT` と `LLAMA_API_KEY` は必須（欠落は起動時の致命的エラー）。

use color_eyre::{eyre::eyre, Result};

/// 待ち受けポートのデフォルト値
pub const DEFAULT_PORT: u16 = 3978;

/// 補完エンドポイントに渡すモデル識別子（固定）
pub const DEFAULT_MODEL: &str = "llama3.2:latest";

/// ボット全体の設定
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// 補完エンドポイントのURL
    pub endpoint: String,
    /// 補完エンドポイントのAPIキー（Bearerトークン）
    pub api_key: String,
    /// モデル識別子
    pub model: String,
    /// HTTPサーバーの待ち受けポート
    pub port: u16,
    /// リクエスト/レスポンスの診断ログを出力するか
    pub log_requests: bool,
}

impl BotConfig {
    /// 環境変数から設定を構築する。
    ///
    /// * `LLAMA_ENDPOINT` (必須)
    /// * `LLAMA_API_KEY` (必須)
    /// * `PORT` (任意、デフォルト 3978)
    /// * `LOG_REQUESTS` (任意、`0`/`false` で無効化、デフォルト有効)
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("LLAMA_ENDPOINT").map_err(|_| {
            eyre!("Missing environment variables - please check that LLAMA_API_KEY and LLAMA_ENDPOINT are set.")
        })?;
        let api_key = std::env::var("LLAMA_API_KEY").map_err(|_| {
            eyre!("Missing environment variables - please check that LLAMA_API_KEY and LLAMA_ENDPOINT are set.")
        })?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| eyre!("PORT must be a valid port number, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let log_requests = std::env::var("LOG_REQUESTS")
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
            .unwrap_or(true);

        Ok(Self {
            endpoint,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            port,
            log_requests,
        })
    }
}
